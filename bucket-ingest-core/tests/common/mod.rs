#![allow(dead_code)]

use bucket_ingest_core::contract::{Fetched, ObjectMeta, ObjectStatus, RemoteObject, StorageClient};
use bucket_ingest_core::{StorageConfig, StorageError};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const BUCKET: &str = "ems-analytics-data";

pub fn storage_config() -> StorageConfig {
    StorageConfig {
        access_key_id: "AKIATEST".to_string(),
        secret_access_key: "test-secret".to_string(),
        region: "us-east-1".to_string(),
        bucket_name: BUCKET.to_string(),
        endpoint_url: None,
    }
}

/// Bucket kept in memory; counts every call so tests can assert "no remote contact".
#[derive(Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<String, Vec<u8>>>,
    calls: Cell<usize>,
}

impl MemoryStore {
    pub fn with_object(self, key: &str, body: &[u8]) -> Self {
        self.objects.borrow_mut().insert(key.to_string(), body.to_vec());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }

    fn touch(&self, bucket: &str) -> Result<(), StorageError> {
        self.calls.set(self.calls.get() + 1);
        if bucket != BUCKET {
            return Err(StorageError::InvalidRequest {
                message: format!("unknown bucket {bucket}"),
            });
        }
        Ok(())
    }
}

impl StorageClient for MemoryStore {
    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<RemoteObject>, StorageError> {
        self.touch(bucket)?;
        Ok(self
            .objects
            .borrow()
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| RemoteObject {
                key: k.clone(),
                size: v.len() as u64,
            })
            .collect())
    }

    fn head(&self, bucket: &str, key: &str) -> Result<ObjectStatus, StorageError> {
        self.touch(bucket)?;
        Ok(match self.objects.borrow().get(key) {
            Some(body) => ObjectStatus::Present(ObjectMeta {
                size: body.len() as u64,
                etag: None,
            }),
            None => ObjectStatus::Absent,
        })
    }

    fn get(&self, bucket: &str, key: &str, dest: &Path) -> Result<Fetched, StorageError> {
        self.touch(bucket)?;
        let Some(body) = self.objects.borrow().get(key).cloned() else {
            return Ok(Fetched::NotFound);
        };
        let io_err = |source| StorageError::Io {
            path: dest.to_path_buf(),
            source,
        };
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(dest, &body).map_err(io_err)?;
        Ok(Fetched::Written(body.len() as u64))
    }

    fn put(&self, bucket: &str, key: &str, src: &Path) -> Result<(), StorageError> {
        self.touch(bucket)?;
        let body = fs::read(src).map_err(|source| StorageError::Io {
            path: src.to_path_buf(),
            source,
        })?;
        self.objects.borrow_mut().insert(key.to_string(), body);
        Ok(())
    }
}
