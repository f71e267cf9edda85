//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use kirokuma_core::errors::KirokumaResult;

use crate::to_storage_err;

/// Write-side pragmas: WAL, NORMAL sync, foreign keys, busy timeout.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> KirokumaResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Read-only pragmas. Skips journal mode and sync settings.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> KirokumaResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> KirokumaResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
