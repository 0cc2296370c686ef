//! # contract: the storage capability the sync engine consumes
//!
//! [`StorageClient`] is the narrow interface to a remote object store. The engine
//! never talks to a concrete SDK; the CLI crate provides an S3 implementation and
//! tests use the generated [`MockStorageClient`].
//!
//! Missing objects are modelled as ordinary result variants ([`ObjectStatus::Absent`],
//! [`Fetched::NotFound`]) rather than errors, so callers never have to inspect
//! error codes to tell "absent" from "broken".
//!
//! Every method is blocking and performs exactly one logical remote operation.

use std::path::Path;

use crate::error::StorageError;

/// One entry of a remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub key: String,
    pub size: u64,
}

/// Metadata returned by a successful metadata probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    pub size: u64,
    pub etag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectStatus {
    Present(ObjectMeta),
    Absent,
}

/// Result of fetching an object into a local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// The object was written to the destination; carries the byte count.
    Written(u64),
    /// No object under the key. The destination was not created.
    NotFound,
}

/// Blocking access to one remote object store.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
pub trait StorageClient {
    /// List objects whose key starts with `prefix`, in store order.
    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<RemoteObject>, StorageError>;

    /// Probe a single key without downloading it.
    fn head(&self, bucket: &str, key: &str) -> Result<ObjectStatus, StorageError>;

    /// Download `key` into `dest`, creating parent directories as needed.
    fn get(&self, bucket: &str, key: &str, dest: &Path) -> Result<Fetched, StorageError>;

    /// Upload the contents of `src` under `key`.
    fn put(&self, bucket: &str, key: &str, src: &Path) -> Result<(), StorageError>;
}
