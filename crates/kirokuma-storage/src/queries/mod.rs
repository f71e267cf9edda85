//! SQL for each table, plus the column codecs they share.

pub mod artifact_ops;
pub mod epoch_ops;
pub mod record_ops;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;

use kirokuma_core::errors::{KirokumaResult, StorageError};

use crate::to_storage_err;

/// Fixed-width UTC timestamps, so text order is time order.
pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> KirokumaResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::Serialization {
                details: format!("timestamp '{raw}': {e}"),
            }
            .into()
        })
}

/// f32 little-endian blob.
pub(crate) fn encode_embedding(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub(crate) fn decode_embedding(bytes: &[u8]) -> KirokumaResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::Serialization {
            details: format!("embedding blob of {} bytes is not f32-aligned", bytes.len()),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Run `f` inside `BEGIN IMMEDIATE`: the write lock is taken up front, so
/// a read-then-write inside `f` cannot interleave with another writer.
pub(crate) fn with_immediate_tx<F, T>(conn: &Connection, label: &str, f: F) -> KirokumaResult<T>
where
    F: FnOnce(&Connection) -> KirokumaResult<T>,
{
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| to_storage_err(format!("{label} begin: {e}")))?;
    match f(conn) {
        Ok(value) => match conn.execute_batch("COMMIT") {
            Ok(()) => Ok(value),
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                Err(to_storage_err(format!("{label} commit: {e}")))
            }
        },
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}
