//! Artifact history queries.

use rusqlite::{params, Connection, Row};

use kirokuma_core::constants::MAX_ARTIFACT_HISTORY;
use kirokuma_core::errors::KirokumaResult;
use kirokuma_core::models::Artifact;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

const ARTIFACT_COLUMNS: &str = "id, user_id, epoch_id, record_id, external_ref, created_at";

type ArtifactRow = (String, String, String, String, String, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<ArtifactRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn to_artifact(
    (id, user_id, epoch_id, record_id, external_ref, created_at): ArtifactRow,
) -> KirokumaResult<Artifact> {
    Ok(Artifact {
        id,
        user_id,
        epoch_id,
        record_id,
        external_ref,
        created_at: parse_ts(&created_at)?,
    })
}

/// Caller holds the transaction.
pub(crate) fn insert_artifact(conn: &Connection, artifact: &Artifact) -> KirokumaResult<()> {
    conn.execute(
        &format!("INSERT INTO artifacts ({ARTIFACT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params![
            artifact.id,
            artifact.user_id,
            artifact.epoch_id,
            artifact.record_id,
            artifact.external_ref,
            fmt_ts(&artifact.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert artifact: {e}")))?;
    Ok(())
}

/// Artifacts of one epoch, newest first. `limit` is capped at 30.
pub fn list_by_epoch(
    conn: &Connection,
    user_id: &str,
    epoch_id: &str,
    limit: usize,
) -> KirokumaResult<Vec<Artifact>> {
    let limit = limit.min(MAX_ARTIFACT_HISTORY) as i64;
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts
             WHERE user_id = ?1 AND epoch_id = ?2
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?3"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id, epoch_id, limit], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let artifacts = rows
        .map(|r| to_artifact(r.map_err(|e| to_storage_err(e.to_string()))?))
        .collect::<KirokumaResult<Vec<_>>>()?;
    Ok(artifacts)
}

pub fn latest(conn: &Connection, user_id: &str, epoch_id: &str) -> KirokumaResult<Option<Artifact>> {
    Ok(list_by_epoch(conn, user_id, epoch_id, 1)?.into_iter().next())
}

pub fn get_by_record(conn: &Connection, record_id: &str) -> KirokumaResult<Option<Artifact>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE record_id = ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![record_id], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let artifact = match rows.next() {
        Some(row) => Some(to_artifact(row.map_err(|e| to_storage_err(e.to_string()))?)?),
        None => None,
    };
    Ok(artifact)
}
