//! Queries for the append-only interactions table.

use railguard_core::errors::StorageError;
use railguard_core::types::InteractionRecord;
use rusqlite::{params, Connection};

/// Insert one interaction row. The table is append-only; duplicate ids
/// are rejected by the primary key.
pub fn insert_interaction(
    conn: &Connection,
    rec: &InteractionRecord,
) -> Result<(), StorageError> {
    let flags_json =
        serde_json::to_string(&rec.feature_flags_used).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        "INSERT INTO interactions (interaction_id, timestamp, user_id, session_id, model_name, prompt_hash, response_hash, response_length, contains_advice, has_disclaimer, compliance_score, processing_time_ms, feature_flags_used, error_occurred)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            rec.interaction_id,
            rec.timestamp,
            rec.user_id,
            rec.session_id,
            rec.model_name,
            rec.prompt_hash,
            rec.response_hash,
            rec.response_length,
            rec.contains_advice as i32,
            rec.has_disclaimer as i32,
            rec.compliance_score,
            rec.processing_time_ms,
            flags_json,
            rec.error_occurred as i32
        ],
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Count all interactions.
pub fn count(conn: &Connection) -> Result<u64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Fetch the most recent interactions, newest first.
pub fn recent(conn: &Connection, limit: u32) -> Result<Vec<InteractionRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT interaction_id, timestamp, user_id, session_id, model_name, prompt_hash, response_hash, response_length, contains_advice, has_disclaimer, compliance_score, processing_time_ms, feature_flags_used, error_occurred
             FROM interactions ORDER BY timestamp DESC LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let rows = stmt
        .query_map(params![limit], |row| {
            let flags_json: String = row.get(12)?;
            Ok(InteractionRecord {
                interaction_id: row.get(0)?,
                timestamp: row.get(1)?,
                user_id: row.get(2)?,
                session_id: row.get(3)?,
                model_name: row.get(4)?,
                prompt_hash: row.get(5)?,
                response_hash: row.get(6)?,
                response_length: row.get(7)?,
                contains_advice: row.get::<_, i32>(8)? != 0,
                has_disclaimer: row.get::<_, i32>(9)? != 0,
                compliance_score: row.get(10)?,
                processing_time_ms: row.get(11)?,
                feature_flags_used: serde_json::from_str(&flags_json).unwrap_or_default(),
                error_occurred: row.get::<_, i32>(13)? != 0,
            })
        })
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Aggregate stats for one day (`YYYY-MM-DD` bounds as epoch seconds).
pub fn day_stats(
    conn: &Connection,
    day_start: u64,
    day_end: u64,
) -> Result<(u64, f64), StorageError> {
    conn.query_row(
        "SELECT COUNT(*), COALESCE(AVG(compliance_score), 0.0)
         FROM interactions WHERE timestamp >= ?1 AND timestamp < ?2",
        params![day_start, day_end],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
