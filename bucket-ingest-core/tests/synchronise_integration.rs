mod common;

use bucket_ingest_core::contract::{MockStorageClient, ObjectMeta, ObjectStatus, RemoteObject};
use bucket_ingest_core::error::{StorageError, TransferErrorKind, ValidationErrorKind};
use bucket_ingest_core::{Category, SkipReason, SyncEngine, SyncTarget, TransferOutcome, Workspace};
use common::{storage_config, MemoryStore, BUCKET};
use std::fs;
use tempfile::tempdir;

fn raw_target(ws: &Workspace) -> SyncTarget {
    SyncTarget::parse(ws, "01_raw", "20210213-abc-raw-test.csv").expect("valid target")
}

fn write_local(target: &SyncTarget, body: &str) {
    fs::create_dir_all(target.local_path().parent().unwrap()).unwrap();
    fs::write(target.local_path(), body).unwrap();
}

#[test]
fn test_download_from_empty_bucket_is_skipped_not_found() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);
    let engine = SyncEngine::new(&storage_config(), MemoryStore::default());

    let outcome = engine.download(&target);

    assert_eq!(outcome.skip_reason(), Some(SkipReason::NotFoundRemotely));
    assert!(!target.local_path().exists(), "local file must stay absent");
}

#[test]
fn test_download_skips_existing_local_file_without_remote_call() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);
    write_local(&target, "local,work\n");

    let mut client = MockStorageClient::new();
    client.expect_get().never();
    client.expect_head().never();
    let engine = SyncEngine::new(&storage_config(), client);

    let outcome = engine.download(&target);

    assert_eq!(outcome.skip_reason(), Some(SkipReason::AlreadyPresentLocally));
    assert_eq!(fs::read_to_string(target.local_path()).unwrap(), "local,work\n");
}

#[test]
fn test_download_is_idempotent() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);
    let store = MemoryStore::default().with_object(target.remote_key(), b"a,b\n1,2\n");
    let engine = SyncEngine::new(&storage_config(), store);

    assert!(matches!(engine.download(&target), TransferOutcome::Completed));
    assert_eq!(fs::read(target.local_path()).unwrap(), b"a,b\n1,2\n");
    let calls_after_first = engine.client().calls();

    let second = engine.download(&target);
    assert_eq!(second.skip_reason(), Some(SkipReason::AlreadyPresentLocally));
    assert_eq!(engine.client().calls(), calls_after_first, "second download must not contact the store");
}

#[test]
fn test_download_failure_is_classified_other() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);

    let mut client = MockStorageClient::new();
    client
        .expect_get()
        .withf(|bucket, key, _dest| bucket == BUCKET && key == "01_raw/20210213-abc-raw-test.csv")
        .times(1)
        .returning(|_, _, _| {
            Err(StorageError::Service {
                message: "AccessDenied".to_string(),
            })
        });
    let engine = SyncEngine::new(&storage_config(), client);

    let err = engine
        .download(&target)
        .into_result()
        .expect_err("service failure must propagate");
    assert_eq!(err.kind(), TransferErrorKind::Other);
    assert!(err.to_string().contains("AccessDenied"));
}

#[test]
fn test_upload_is_create_if_absent() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);
    write_local(&target, "v1\n");
    let engine = SyncEngine::new(&storage_config(), MemoryStore::default());

    assert!(matches!(engine.upload(&target), TransferOutcome::Completed));
    assert!(engine.exists(&target).unwrap());

    write_local(&target, "v2\n");
    let second = engine.upload(&target);
    assert_eq!(second.skip_reason(), Some(SkipReason::AlreadyPresentRemotely));
    assert_eq!(engine.client().len(), 1);
    assert_eq!(engine.client().object(target.remote_key()).unwrap(), b"v1\n");
}

#[test]
fn test_upload_skips_without_put_when_remote_exists() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);
    write_local(&target, "x\n");

    let mut client = MockStorageClient::new();
    client.expect_head().times(1).returning(|_, _| {
        Ok(ObjectStatus::Present(ObjectMeta {
            size: 2,
            etag: Some("\"abc\"".to_string()),
        }))
    });
    client.expect_put().never();
    let engine = SyncEngine::new(&storage_config(), client);

    assert_eq!(
        engine.upload(&target).skip_reason(),
        Some(SkipReason::AlreadyPresentRemotely)
    );
}

#[test]
fn test_upload_without_local_file_fails_before_remote_call() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);

    let mut client = MockStorageClient::new();
    client.expect_head().never();
    client.expect_put().never();
    let engine = SyncEngine::new(&storage_config(), client);

    match engine.upload(&target) {
        TransferOutcome::Failed(e) => assert_eq!(e.kind(), TransferErrorKind::Other),
        other => panic!("expected failure, got {other}"),
    }
}

#[test]
fn test_upload_put_failure_is_failed_other() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = raw_target(&ws);
    write_local(&target, "x\n");

    let mut client = MockStorageClient::new();
    client.expect_head().returning(|_, _| Ok(ObjectStatus::Absent));
    client.expect_put().times(1).returning(|_, _, _| {
        Err(StorageError::Service {
            message: "SlowDown".to_string(),
        })
    });
    let engine = SyncEngine::new(&storage_config(), client);

    let err = engine.upload(&target).into_result().unwrap_err();
    assert_eq!(err.kind(), TransferErrorKind::Other);
}

#[test]
fn test_exists_maps_absent_to_false_and_errors_to_other() {
    let ws = Workspace::new("/unused", "ems-analytics");
    let target = raw_target(&ws);

    let mut client = MockStorageClient::new();
    client.expect_head().times(1).returning(|_, _| Ok(ObjectStatus::Absent));
    let engine = SyncEngine::new(&storage_config(), client);
    assert!(!engine.exists(&target).unwrap());

    let mut client = MockStorageClient::new();
    client.expect_head().times(1).returning(|_, _| {
        Err(StorageError::InvalidRequest {
            message: "bad key".to_string(),
        })
    });
    let engine = SyncEngine::new(&storage_config(), client);
    assert_eq!(engine.exists(&target).unwrap_err().kind(), TransferErrorKind::Other);
}

#[test]
fn test_list_excludes_directory_marker() {
    let mut client = MockStorageClient::new();
    client
        .expect_list()
        .withf(|bucket, prefix| bucket == BUCKET && prefix == "01_raw/")
        .times(1)
        .returning(|_, _| {
            Ok(["01_raw/", "01_raw/20210213-ems-raw.xlsx", "01_raw/20210301-abc-visits.csv"]
                .into_iter()
                .map(|key| RemoteObject {
                    key: key.to_string(),
                    size: 10,
                })
                .collect())
        });
    let engine = SyncEngine::new(&storage_config(), client);

    let listing = engine.list(Category::Raw).unwrap();
    assert!(!listing.contains("01_raw/"));
    assert_eq!(
        listing.keys,
        vec!["01_raw/20210213-ems-raw.xlsx", "01_raw/20210301-abc-visits.csv"]
    );
}

#[test]
fn test_list_only_returns_keys_under_category() {
    let store = MemoryStore::default()
        .with_object("01_raw/", b"")
        .with_object("01_raw/a.csv", b"1")
        .with_object("01_rawish/b.csv", b"2")
        .with_object("02_intermediate/c.csv", b"3");
    let engine = SyncEngine::new(&storage_config(), store);

    let listing = engine.list(Category::Raw).unwrap();
    assert_eq!(listing.keys, vec!["01_raw/a.csv"]);
}

#[test]
fn test_list_invalid_request_is_surfaced() {
    let mut client = MockStorageClient::new();
    client.expect_list().times(1).returning(|_, _| {
        Err(StorageError::InvalidRequest {
            message: "InvalidBucketName".to_string(),
        })
    });
    let engine = SyncEngine::new(&storage_config(), client);

    let err = engine.list(Category::Processed).unwrap_err();
    assert_eq!(err.kind(), TransferErrorKind::InvalidRequest);
}

#[test]
fn test_list_service_failure_is_classified_other() {
    let mut client = MockStorageClient::new();
    client.expect_list().times(1).returning(|_, _| {
        Err(StorageError::Service {
            message: "SlowDown".to_string(),
        })
    });
    let engine = SyncEngine::new(&storage_config(), client);

    let err = engine.list(Category::Models).unwrap_err();
    assert_eq!(err.kind(), TransferErrorKind::Other);
    assert!(err.to_string().contains("SlowDown"));
}

#[test]
fn test_exists_maps_present_to_true() {
    let ws = Workspace::new("/unused", "ems-analytics");
    let target = raw_target(&ws);

    let mut client = MockStorageClient::new();
    client
        .expect_head()
        .withf(|bucket, key| bucket == BUCKET && key == "01_raw/20210213-abc-raw-test.csv")
        .times(1)
        .returning(|_, _| {
            Ok(ObjectStatus::Present(ObjectMeta {
                size: 42,
                etag: None,
            }))
        });
    let engine = SyncEngine::new(&storage_config(), client);

    assert!(engine.exists(&target).unwrap());
}

#[test]
fn test_unknown_category_rejected_before_any_network_call() {
    let ws = Workspace::new("/unused", "ems-analytics");
    let client = MockStorageClient::new();
    let _engine = SyncEngine::new(&storage_config(), client);

    let err = SyncTarget::parse(&ws, "07_unknown", "20210213-abc-raw-test.csv").unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::InvalidCategory);
}

#[test]
fn test_get_writes_through_memory_store_into_category_dir() {
    let dir = tempdir().unwrap();
    let ws = Workspace::new(dir.path(), "ems-analytics");
    let target = SyncTarget::parse(&ws, "reporting", "20210401-abc-summary.html").unwrap();
    let store = MemoryStore::default().with_object("06_reporting/20210401-abc-summary.html", b"<p/>");
    let engine = SyncEngine::new(&storage_config(), store);

    assert!(matches!(engine.download(&target), TransferOutcome::Completed));
    assert!(dir
        .path()
        .join("ems-analytics/data/06_reporting/20210401-abc-summary.html")
        .is_file());
}
