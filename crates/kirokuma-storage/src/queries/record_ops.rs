//! Meal record queries. A record is only ever written together with its artifact.

use rusqlite::{params, Connection, Row};

use kirokuma_core::errors::{EpochError, KirokumaError, KirokumaResult, StorageError};
use kirokuma_core::models::{Artifact, MealRecord, RecordWindow};

use super::artifact_ops::insert_artifact;
use super::epoch_ops::get_epoch;
use super::{decode_embedding, encode_embedding, fmt_ts, parse_ts, with_immediate_tx};
use crate::to_storage_err;

const RECORD_COLUMNS: &str =
    "id, user_id, epoch_id, primary_label, tags, ingredients, embedding, created_at";

struct RecordRow {
    id: String,
    user_id: String,
    epoch_id: String,
    primary_label: String,
    tags: String,
    ingredients: String,
    embedding: Option<Vec<u8>>,
    created_at: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        epoch_id: row.get(2)?,
        primary_label: row.get(3)?,
        tags: row.get(4)?,
        ingredients: row.get(5)?,
        embedding: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn decode_list(raw: &str) -> KirokumaResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        StorageError::Serialization {
            details: format!("string list: {e}"),
        }
        .into()
    })
}

fn to_record(row: RecordRow) -> KirokumaResult<MealRecord> {
    Ok(MealRecord {
        id: row.id,
        user_id: row.user_id,
        epoch_id: row.epoch_id,
        primary_label: row.primary_label,
        tags: decode_list(&row.tags)?,
        ingredients: decode_list(&row.ingredients)?,
        embedding: row
            .embedding
            .as_deref()
            .map(decode_embedding)
            .transpose()?
            .filter(|v| !v.is_empty()),
        created_at: parse_ts(&row.created_at)?,
    })
}

/// Insert a record and its artifact in one transaction.
///
/// The target epoch must exist, belong to the record's user, and still be
/// active; the artifact must point at the record.
pub fn insert_with_artifact(
    conn: &Connection,
    record: &MealRecord,
    artifact: &Artifact,
) -> KirokumaResult<()> {
    if artifact.record_id != record.id
        || artifact.user_id != record.user_id
        || artifact.epoch_id != record.epoch_id
    {
        return Err(KirokumaError::InvalidInput {
            reason: format!("artifact {} does not match record {}", artifact.id, record.id),
        });
    }

    with_immediate_tx(conn, "insert_record", |conn| {
        let epoch = get_epoch(conn, &record.epoch_id)?.ok_or_else(|| EpochError::NotFound {
            epoch_id: record.epoch_id.clone(),
        })?;
        if epoch.user_id != record.user_id {
            return Err(EpochError::Foreign {
                epoch_id: epoch.id,
                user_id: record.user_id.clone(),
            }
            .into());
        }
        if !epoch.is_active() {
            return Err(EpochError::Ended { epoch_id: epoch.id }.into());
        }

        insert_record(conn, record)?;
        insert_artifact(conn, artifact)?;
        Ok(())
    })
}

fn insert_record(conn: &Connection, record: &MealRecord) -> KirokumaResult<()> {
    let tags = serde_json::to_string(&record.tags)?;
    let ingredients = serde_json::to_string(&record.ingredients)?;
    conn.execute(
        &format!("INSERT INTO meal_records ({RECORD_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        params![
            record.id,
            record.user_id,
            record.epoch_id,
            record.primary_label,
            tags,
            ingredients,
            record.embedding.as_deref().map(encode_embedding),
            fmt_ts(&record.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert record: {e}")))?;
    Ok(())
}

pub fn get_record(conn: &Connection, record_id: &str) -> KirokumaResult<Option<MealRecord>> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {RECORD_COLUMNS} FROM meal_records WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![record_id], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let record = match rows.next() {
        Some(row) => Some(to_record(row.map_err(|e| to_storage_err(e.to_string()))?)?),
        None => None,
    };
    Ok(record)
}

/// Records of one epoch inside `window`, newest first.
pub fn list_by_epoch(
    conn: &Connection,
    user_id: &str,
    epoch_id: &str,
    window: RecordWindow,
) -> KirokumaResult<Vec<MealRecord>> {
    let since = window.since.as_ref().map(fmt_ts);
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {RECORD_COLUMNS} FROM meal_records
             WHERE user_id = ?1 AND epoch_id = ?2 AND (?3 IS NULL OR created_at >= ?3)
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?4"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![user_id, epoch_id, since, window.limit as i64],
            read_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let records = rows
        .map(|r| to_record(r.map_err(|e| to_storage_err(e.to_string()))?))
        .collect::<KirokumaResult<Vec<_>>>()?;
    Ok(records)
}

pub fn count(conn: &Connection, user_id: &str, epoch_id: &str) -> KirokumaResult<u64> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM meal_records WHERE user_id = ?1 AND epoch_id = ?2",
            params![user_id, epoch_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n.max(0) as u64)
}
