//! Error taxonomy for bucket-ingest.
//!
//! - [`ValidationError`]: bad category or file name, raised before any I/O.
//! - [`ConfigError`]: missing or malformed credentials/settings, fatal at startup.
//! - [`StorageError`]: what a [`StorageClient`](crate::contract::StorageClient) reports.
//! - [`TransferError`]: what the sync engine surfaces after classifying a storage failure.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected input for a [`SyncTarget`](crate::target::SyncTarget).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid category '{value}': expected one of 01_raw, 02_intermediate, 03_processed, 04_models, 05_model_input, 06_reporting")]
    InvalidCategory { value: String },

    /// Empty, or a path rather than a plain file name.
    #[error("invalid file name '{value}': {reason}")]
    InvalidType { value: String, reason: String },

    #[error("invalid extension for '{value}': allowed extensions are {allowed}")]
    InvalidExtension { value: String, allowed: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    InvalidCategory,
    InvalidType,
    InvalidExtension,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::InvalidCategory { .. } => ValidationErrorKind::InvalidCategory,
            ValidationError::InvalidType { .. } => ValidationErrorKind::InvalidType,
            ValidationError::InvalidExtension { .. } => ValidationErrorKind::InvalidExtension,
        }
    }
}

/// Startup configuration failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config YAML in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{name} environment variable not set")]
    MissingEnv { name: String },

    #[error("config field '{field}' must not be empty")]
    EmptyField { field: String },

    #[error("could not determine workspace root for project '{project}' from {start}")]
    WorkspaceNotFound { project: String, start: PathBuf },
}

/// Failure reported by a storage backend. "Not found" is not an error here;
/// it is a variant of the successful result types in [`crate::contract`].
#[derive(Error, Debug)]
pub enum StorageError {
    /// The request was rejected before or by the service because of bad parameters.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("storage service error: {message}")]
    Service { message: String },

    #[error("local I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferErrorKind {
    NotFound,
    InvalidRequest,
    Other,
}

/// A classified failure of a sync engine operation.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Part of the taxonomy for callers that need to fail on a missing object.
    /// The engine never returns it: a missing object is `Skipped` or `false`.
    #[error("remote object '{key}' not found")]
    NotFound { key: String },

    #[error("{operation} rejected as invalid request: {source}")]
    InvalidRequest {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("{operation} failed for '{target}': {message}")]
    Other {
        operation: &'static str,
        target: String,
        message: String,
        #[source]
        source: Option<StorageError>,
    },
}

impl TransferError {
    pub fn kind(&self) -> TransferErrorKind {
        match self {
            TransferError::NotFound { .. } => TransferErrorKind::NotFound,
            TransferError::InvalidRequest { .. } => TransferErrorKind::InvalidRequest,
            TransferError::Other { .. } => TransferErrorKind::Other,
        }
    }

    pub(crate) fn other(operation: &'static str, target: &str, source: StorageError) -> Self {
        TransferError::Other {
            operation,
            target: target.to_string(),
            message: source.to_string(),
            source: Some(source),
        }
    }
}
