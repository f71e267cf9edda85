//! Epoch queries: active lookup, atomic create-if-absent, rotate, end.

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, Row};

use kirokuma_core::errors::{EpochError, KirokumaResult};
use kirokuma_core::models::{Epoch, EpochCreation, EpochRotation};

use super::{fmt_ts, parse_ts, with_immediate_tx};
use crate::to_storage_err;

const EPOCH_COLUMNS: &str = "id, user_id, created_at, ended_at";

type EpochRow = (String, String, String, Option<String>);

fn read_row(row: &Row<'_>) -> rusqlite::Result<EpochRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn to_epoch((id, user_id, created_at, ended_at): EpochRow) -> KirokumaResult<Epoch> {
    Ok(Epoch {
        id,
        user_id,
        created_at: parse_ts(&created_at)?,
        ended_at: ended_at.as_deref().map(parse_ts).transpose()?,
    })
}

/// The active epoch of `user_id`. More than one row is fatal.
pub fn find_active(conn: &Connection, user_id: &str) -> KirokumaResult<Option<Epoch>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {EPOCH_COLUMNS} FROM epochs WHERE user_id = ?1 AND ended_at IS NULL"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows: Vec<EpochRow> = stmt
        .query_map(params![user_id], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<rusqlite::Result<_>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.len() {
        0 => Ok(None),
        1 => rows.into_iter().next().map(to_epoch).transpose(),
        n => {
            tracing::error!(user_id, active_count = n, "more than one active epoch");
            Err(EpochError::InvariantViolated {
                user_id: user_id.to_string(),
                active_count: n,
            }
            .into())
        }
    }
}

pub fn get_epoch(conn: &Connection, epoch_id: &str) -> KirokumaResult<Option<Epoch>> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {EPOCH_COLUMNS} FROM epochs WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![epoch_id], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let epoch = match rows.next() {
        Some(row) => Some(to_epoch(row.map_err(|e| to_storage_err(e.to_string()))?)?),
        None => None,
    };
    Ok(epoch)
}

/// Every epoch of `user_id`, newest first.
pub fn list_by_user(conn: &Connection, user_id: &str) -> KirokumaResult<Vec<Epoch>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {EPOCH_COLUMNS} FROM epochs WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let epochs = rows
        .map(|r| to_epoch(r.map_err(|e| to_storage_err(e.to_string()))?))
        .collect::<KirokumaResult<Vec<_>>>()?;
    Ok(epochs)
}

/// Insert an epoch row. Returns false when the active-epoch index rejects it.
fn insert_epoch(conn: &Connection, epoch: &Epoch) -> KirokumaResult<bool> {
    let result = conn.execute(
        "INSERT INTO epochs (id, user_id, created_at, ended_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            epoch.id,
            epoch.user_id,
            fmt_ts(&epoch.created_at),
            epoch.ended_at.as_ref().map(fmt_ts),
        ],
    );
    match result {
        Ok(_) => Ok(true),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Ok(false)
        }
        Err(e) => Err(to_storage_err(format!("insert epoch: {e}"))),
    }
}

/// Create an active epoch unless one exists.
pub fn create_if_absent(conn: &Connection, user_id: &str) -> KirokumaResult<EpochCreation> {
    with_immediate_tx(conn, "create_if_absent", |conn| {
        if let Some(epoch) = find_active(conn, user_id)? {
            return Ok(EpochCreation {
                epoch,
                created: false,
            });
        }
        let epoch = Epoch::new(user_id);
        if insert_epoch(conn, &epoch)? {
            return Ok(EpochCreation {
                epoch,
                created: true,
            });
        }
        // Lost to a writer the lock did not cover; adopt its epoch.
        let epoch = find_active(conn, user_id)?.ok_or_else(|| {
            to_storage_err(format!("active epoch for {user_id} rejected but not found"))
        })?;
        Ok(EpochCreation {
            epoch,
            created: false,
        })
    })
}

/// End the active epoch (if any) and start a new one in one transaction.
pub fn rotate(conn: &Connection, user_id: &str) -> KirokumaResult<EpochRotation> {
    with_immediate_tx(conn, "rotate", |conn| {
        let ended = match find_active(conn, user_id)? {
            Some(mut current) => {
                let now = Utc::now();
                end_active(conn, &current.id, &now)?;
                current.ended_at = Some(now);
                Some(current)
            }
            None => None,
        };
        let started = Epoch::new(user_id);
        if !insert_epoch(conn, &started)? {
            return Err(EpochError::InvariantViolated {
                user_id: user_id.to_string(),
                active_count: 2,
            }
            .into());
        }
        Ok(EpochRotation { ended, started })
    })
}

/// Set `ended_at` on an epoch. Already-ended epochs are left untouched.
pub fn end_epoch(conn: &Connection, epoch_id: &str) -> KirokumaResult<()> {
    let exists = get_epoch(conn, epoch_id)?.is_some();
    if !exists {
        return Err(EpochError::NotFound {
            epoch_id: epoch_id.to_string(),
        }
        .into());
    }
    end_active(conn, epoch_id, &Utc::now())?;
    Ok(())
}

fn end_active(conn: &Connection, epoch_id: &str, at: &chrono::DateTime<Utc>) -> KirokumaResult<usize> {
    conn.execute(
        "UPDATE epochs SET ended_at = ?2 WHERE id = ?1 AND ended_at IS NULL",
        params![epoch_id, fmt_ts(at)],
    )
    .map_err(|e| to_storage_err(format!("end epoch: {e}")))
}
