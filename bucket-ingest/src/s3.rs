#![doc = "S3 implementation of the storage capability used by the sync engine."]
//
//! # S3 storage (CLI <-> Core)
//!
//! [`S3Storage`] implements [`StorageClient`] from `bucket-ingest-core` on top of
//! `aws-sdk-s3`. The SDK is async; this adapter owns a current-thread `tokio`
//! runtime and blocks on each request, so the engine stays synchronous and
//! single-threaded.
//!
//! Error mapping:
//! - `HeadObject` not found → [`ObjectStatus::Absent`]
//! - `GetObject` `NoSuchKey` → [`Fetched::NotFound`]
//! - request construction failures and `InvalidRequest`/`InvalidArgument`/
//!   `InvalidBucketName` codes → [`StorageError::InvalidRequest`]
//! - everything else → [`StorageError::Service`]

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use bucket_ingest_core::contract::{Fetched, ObjectMeta, ObjectStatus, RemoteObject, StorageClient};
use bucket_ingest_core::{StorageConfig, StorageError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tokio::runtime::Runtime;

const INVALID_REQUEST_CODES: &[&str] = &["InvalidRequest", "InvalidArgument", "InvalidBucketName"];

pub struct S3Storage {
    client: aws_sdk_s3::Client,
    runtime: Runtime,
}

impl S3Storage {
    pub fn new(config: &StorageConfig) -> std::io::Result<Self> {
        let creds = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "bucket-ingest-config",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(creds);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        tracing::info!(
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "Initialized S3 storage client"
        );
        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            runtime,
        })
    }
}

impl StorageClient for S3Storage {
    fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<RemoteObject>, StorageError> {
        tracing::debug!(bucket, prefix, "ListObjectsV2");
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .runtime
                .block_on(
                    self.client
                        .list_objects_v2()
                        .bucket(bucket)
                        .prefix(prefix)
                        .set_continuation_token(continuation_token.take())
                        .send(),
                )
                .map_err(classify)?;

            for obj in output.contents() {
                if let Some(key) = obj.key() {
                    objects.push(RemoteObject {
                        key: key.to_string(),
                        size: obj.size().unwrap_or(0).max(0) as u64,
                    });
                }
            }

            if output.is_truncated() == Some(true) {
                continuation_token = output.next_continuation_token().map(String::from);
            } else {
                break;
            }
        }

        tracing::debug!(count = objects.len(), prefix, "Listed objects");
        Ok(objects)
    }

    fn head(&self, bucket: &str, key: &str) -> Result<ObjectStatus, StorageError> {
        tracing::debug!(bucket, key, "HeadObject");
        let result = self
            .runtime
            .block_on(self.client.head_object().bucket(bucket).key(key).send());

        match result {
            Ok(output) => Ok(ObjectStatus::Present(ObjectMeta {
                size: output.content_length().unwrap_or(0).max(0) as u64,
                etag: output.e_tag().map(str::to_string),
            })),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(HeadObjectError::is_not_found) =>
            {
                Ok(ObjectStatus::Absent)
            }
            Err(err) => Err(classify(err)),
        }
    }

    fn get(&self, bucket: &str, key: &str, dest: &Path) -> Result<Fetched, StorageError> {
        tracing::debug!(bucket, key, dest = %dest.display(), "GetObject");
        let result = self
            .runtime
            .block_on(self.client.get_object().bucket(bucket).key(key).send());

        let output = match result {
            Ok(output) => output,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key) =>
            {
                return Ok(Fetched::NotFound);
            }
            Err(err) => return Err(classify(err)),
        };

        let body = self
            .runtime
            .block_on(output.body.collect())
            .map_err(|e| StorageError::Service {
                message: format!("failed to read body of {key}: {e}"),
            })?
            .into_bytes();

        write_no_clobber(dest, &body)?;
        Ok(Fetched::Written(body.len() as u64))
    }

    fn put(&self, bucket: &str, key: &str, src: &Path) -> Result<(), StorageError> {
        tracing::debug!(bucket, key, src = %src.display(), "PutObject");
        let data = fs::read(src).map_err(|source| StorageError::Io {
            path: src.to_path_buf(),
            source,
        })?;

        self.runtime
            .block_on(
                self.client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(data))
                    .send(),
            )
            .map_err(classify)?;
        Ok(())
    }
}

/// Writes through a temp file in the destination directory, then renames it into
/// place only if `dest` still does not exist.
fn write_no_clobber(dest: &Path, body: &[u8]) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: dest.to_path_buf(),
        source,
    };
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    fs::create_dir_all(parent).map_err(io_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
    tmp.write_all(body).map_err(io_err)?;
    tmp.persist_noclobber(dest).map_err(|e| io_err(e.error))?;
    Ok(())
}

fn classify<E>(err: SdkError<E>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    if matches!(err, SdkError::ConstructionFailure(_)) {
        return StorageError::InvalidRequest { message };
    }
    let code = err.as_service_error().and_then(|e| e.code());
    match code {
        Some(code) if INVALID_REQUEST_CODES.contains(&code) => StorageError::InvalidRequest { message },
        _ => StorageError::Service { message },
    }
}
