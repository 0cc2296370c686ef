//! Sync engine: list, probe, download and upload single project files.
//!
//! [`SyncEngine`] binds one bucket (from [`StorageConfig`]) to an injected
//! [`StorageClient`] and applies the idempotency rules of the project:
//!
//! - a download never overwrites a file that already exists locally;
//! - an upload never overwrites an object that already exists remotely.
//!   A revised artifact gets a new file name instead.
//!
//! Every operation issues at most one call on the storage client and at most one
//! local existence check, then returns a terminal result. Nothing is retried.
//!
//! # Races
//! The existence check and the following `get`/`put` are two separate steps.
//! Two engines working on the same target at the same time may both pass the
//! check; the second `put` then overwrites the first. Callers that share a
//! target across processes must serialise those operations themselves.

use tracing::{error, info, warn};

use crate::category::Category;
use crate::config::StorageConfig;
use crate::contract::{Fetched, ObjectStatus, StorageClient};
use crate::error::{StorageError, TransferError};
use crate::listing::RemoteListing;
use crate::outcome::{SkipReason, TransferOutcome};
use crate::resolve;
use crate::target::SyncTarget;

pub struct SyncEngine<C> {
    bucket: String,
    client: C,
}

impl<C: StorageClient> SyncEngine<C> {
    pub fn new(config: &StorageConfig, client: C) -> Self {
        info!(bucket = %config.bucket_name, "[INGEST] Sync engine ready");
        Self {
            bucket: config.bucket_name.clone(),
            client,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Keys stored under the category prefix, directory marker excluded.
    pub fn list(&self, category: Category) -> Result<RemoteListing, TransferError> {
        let prefix = resolve::directory_marker(resolve::category_prefix(category));
        info!(bucket = %self.bucket, prefix = %prefix, "[INGEST][LIST] Listing remote objects");

        let objects = self.client.list(&self.bucket, &prefix).map_err(|e| {
            error!(error = %e, prefix = %prefix, "[INGEST][LIST] Listing failed");
            match e {
                e @ StorageError::InvalidRequest { .. } => TransferError::InvalidRequest {
                    operation: "list",
                    source: e,
                },
                other => TransferError::other("list", &prefix, other),
            }
        })?;

        let listing = RemoteListing::from_objects(category, objects);
        info!(count = listing.len(), prefix = %prefix, "[INGEST][LIST] Listing complete");
        Ok(listing)
    }

    /// Whether the target's key exists in the bucket. An absent object is `false`,
    /// not an error.
    pub fn exists(&self, target: &SyncTarget) -> Result<bool, TransferError> {
        match self.client.head(&self.bucket, target.remote_key()) {
            Ok(ObjectStatus::Present(meta)) => {
                info!(key = target.remote_key(), size = meta.size, "[INGEST][EXISTS] Object present");
                Ok(true)
            }
            Ok(ObjectStatus::Absent) => {
                info!(key = target.remote_key(), "[INGEST][EXISTS] Object absent");
                Ok(false)
            }
            Err(e) => {
                error!(error = %e, key = target.remote_key(), "[INGEST][EXISTS] Metadata probe failed");
                Err(TransferError::other("exists", target.remote_key(), e))
            }
        }
    }

    /// Fetch the target into its local path unless a local copy already exists.
    pub fn download(&self, target: &SyncTarget) -> TransferOutcome {
        warn_on_loose_name(target);
        let local = target.local_path();

        if local.exists() {
            info!(
                path = %local.display(),
                key = target.remote_key(),
                "[INGEST][DOWNLOAD] Skipped: file already present locally"
            );
            return TransferOutcome::Skipped(SkipReason::AlreadyPresentLocally);
        }

        match self.client.get(&self.bucket, target.remote_key(), local) {
            Ok(Fetched::Written(bytes)) => {
                info!(
                    key = target.remote_key(),
                    path = %local.display(),
                    bytes,
                    "[INGEST][DOWNLOAD] Download complete"
                );
                TransferOutcome::Completed
            }
            Ok(Fetched::NotFound) => {
                info!(
                    key = target.remote_key(),
                    bucket = %self.bucket,
                    "[INGEST][DOWNLOAD] Skipped: object not found in bucket"
                );
                TransferOutcome::Skipped(SkipReason::NotFoundRemotely)
            }
            Err(e) => {
                error!(error = %e, key = target.remote_key(), "[INGEST][DOWNLOAD] Download failed");
                TransferOutcome::Failed(TransferError::other("download", target.remote_key(), e))
            }
        }
    }

    /// Publish the local file under the target's key unless the key is already taken.
    pub fn upload(&self, target: &SyncTarget) -> TransferOutcome {
        warn_on_loose_name(target);
        let local = target.local_path();

        if !local.is_file() {
            error!(path = %local.display(), "[INGEST][UPLOAD] Local file missing");
            return TransferOutcome::Failed(TransferError::Other {
                operation: "upload",
                target: target.remote_key().to_string(),
                message: format!("local file {} does not exist", local.display()),
                source: None,
            });
        }

        match self.exists(target) {
            Ok(true) => {
                info!(
                    key = target.remote_key(),
                    bucket = %self.bucket,
                    "[INGEST][UPLOAD] Skipped: object already present in bucket"
                );
                return TransferOutcome::Skipped(SkipReason::AlreadyPresentRemotely);
            }
            Ok(false) => {}
            Err(e) => return TransferOutcome::Failed(e),
        }

        match self.client.put(&self.bucket, target.remote_key(), local) {
            Ok(()) => {
                info!(
                    key = target.remote_key(),
                    path = %local.display(),
                    "[INGEST][UPLOAD] Upload complete"
                );
                TransferOutcome::Completed
            }
            Err(e) => {
                error!(error = %e, key = target.remote_key(), "[INGEST][UPLOAD] Upload failed");
                TransferOutcome::Failed(TransferError::other("upload", target.remote_key(), e))
            }
        }
    }
}

fn warn_on_loose_name(target: &SyncTarget) {
    if !target.filename().follows_naming_convention() {
        warn!(
            file = %target.filename(),
            "File name does not follow YYYYMMDD-initials-short-description.ext"
        );
    }
}
