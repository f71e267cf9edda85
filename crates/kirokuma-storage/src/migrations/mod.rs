//! Schema migrations tracked with `PRAGMA user_version`.

pub mod v001_initial_schema;

use rusqlite::Connection;

use kirokuma_core::errors::{KirokumaResult, StorageError};
use tracing::info;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial_schema::MIGRATION_SQL)];

/// Apply every migration newer than the database's `user_version`.
pub fn run_migrations(conn: &Connection) -> KirokumaResult<()> {
    let current = current_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(StorageError::MigrationFailed {
            version: current,
            reason: format!("database schema is newer than this build (latest {latest})"),
        }
        .into());
    }
    for &(version, sql) in MIGRATIONS {
        if current >= version {
            continue;
        }
        conn.execute_batch(sql)
            .and_then(|_| conn.pragma_update(None, "user_version", version))
            .map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        info!(version, "applied migration");
    }
    Ok(())
}

/// The schema version recorded in the database.
pub fn current_version(conn: &Connection) -> KirokumaResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| {
            StorageError::MigrationFailed {
                version: 0,
                reason: e.to_string(),
            }
            .into()
        })
}

/// Latest schema version this build knows about.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
}
