//! Schema versioning and journal mode of file-backed stores.

use kirokuma_core::errors::{KirokumaError, StorageError};
use kirokuma_storage::migrations::{current_version, latest_version};
use kirokuma_storage::pool::pragmas::verify_wal_mode;
use kirokuma_storage::StorageEngine;

#[test]
fn file_backed_store_runs_in_wal_mode_at_latest_schema() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("kirokuma.db")).unwrap();
    let (wal, version) = engine
        .pool()
        .writer
        .with_conn_sync(|conn| Ok((verify_wal_mode(conn)?, current_version(conn)?)))
        .unwrap();
    assert!(wal);
    assert_eq!(version, latest_version());
    assert!(latest_version() >= 1);
}

#[test]
fn reopening_does_not_reapply_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kirokuma.db");
    drop(StorageEngine::open(&path).unwrap());
    let engine = StorageEngine::open(&path).unwrap();
    let version = engine
        .pool()
        .writer
        .with_conn_sync(current_version)
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn schema_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kirokuma.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();
    }
    let err = StorageEngine::open(&path).err().unwrap();
    assert!(matches!(
        err,
        KirokumaError::StorageError(StorageError::MigrationFailed { .. })
    ));
}
