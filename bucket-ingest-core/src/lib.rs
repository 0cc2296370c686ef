#![doc = "bucket-ingest-core: core logic library for bucket-ingest."]

//! This crate holds everything that does not depend on a concrete object store:
//! data categories, file name validation, key/path resolution, the storage
//! capability trait and the sync engine built on top of it.
//!
//! # Usage
//! Build a [`SyncTarget`] for a `(category, file name)` pair, inject a
//! [`StorageClient`] into a [`SyncEngine`], then call `list`, `exists`,
//! `download` or `upload`.

pub mod category;
pub mod config;
pub mod contract;
pub mod error;
pub mod filename;
pub mod listing;
pub mod outcome;
pub mod resolve;
pub mod synchronise;
pub mod target;
pub mod workspace;

pub use category::Category;
pub use config::StorageConfig;
pub use contract::StorageClient;
pub use error::{ConfigError, StorageError, TransferError, ValidationError};
pub use filename::DataFileName;
pub use listing::RemoteListing;
pub use outcome::{SkipReason, TransferOutcome};
pub use synchronise::SyncEngine;
pub use target::SyncTarget;
pub use workspace::Workspace;
