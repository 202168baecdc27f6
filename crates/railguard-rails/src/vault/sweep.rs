//! Force-encrypt sweep: finds sensitive columns whose values do not look
//! encrypted and encrypts them in place.

use rusqlite::Connection;

use railguard_core::types::RepairResult;

use super::{looks_encrypted, EncryptionVault};

/// Column/table name fragments treated as sensitive.
const SENSITIVE_KEYWORDS: &[&str] = &[
    "password", "key", "token", "secret", "ssn", "credit", "email", "phone", "address",
    "client", "attorney",
];

fn is_sensitive(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Scan all tables for sensitive TEXT columns and encrypt any value that
/// fails [`looks_encrypted`].
///
/// Idempotent: re-running skips values already carrying the token form,
/// so nothing is ever double-encrypted.
pub fn scan_and_force_encrypt(vault: &EncryptionVault, conn: &Connection) -> RepairResult {
    let mut fixed = 0u32;
    let mut errors: Vec<String> = Vec::new();
    let mut columns_scanned = 0u32;

    let tables = match list_tables(conn) {
        Ok(t) => t,
        Err(e) => return RepairResult::failed("encryption_enforcer", e),
    };

    for table in &tables {
        let columns = match list_text_columns(conn, table) {
            Ok(c) => c,
            Err(e) => {
                errors.push(format!("{table}: {e}"));
                continue;
            }
        };

        for column in columns {
            if !is_sensitive(&column) && !is_sensitive(table) {
                continue;
            }
            columns_scanned += 1;
            match encrypt_column(vault, conn, table, &column) {
                Ok(n) => fixed += n,
                Err(e) => errors.push(format!("{table}.{column}: {e}")),
            }
        }
    }

    let details = serde_json::json!({
        "tables": tables.len(),
        "sensitive_columns": columns_scanned,
        "errors": errors,
    });
    let result = if errors.is_empty() {
        RepairResult::success("encryption_enforcer", fixed)
    } else {
        RepairResult::partial("encryption_enforcer", fixed, errors.join("; "))
    };
    result.with_details(details)
}

fn list_tables(conn: &Connection) -> Result<Vec<String>, String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| e.to_string())?;
    rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
}

fn list_text_columns(conn: &Connection, table: &str) -> Result<Vec<String>, String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info(\"{table}\")"))
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            let name: String = row.get(1)?;
            let col_type: String = row.get(2)?;
            Ok((name, col_type))
        })
        .map_err(|e| e.to_string())?;

    let mut columns = Vec::new();
    for row in rows {
        let (name, col_type) = row.map_err(|e| e.to_string())?;
        if col_type.to_uppercase().contains("TEXT") {
            columns.push(name);
        }
    }
    Ok(columns)
}

/// Encrypt every plaintext-looking value in one column. Uses the rowid to
/// write back in place.
fn encrypt_column(
    vault: &EncryptionVault,
    conn: &Connection,
    table: &str,
    column: &str,
) -> Result<u32, String> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT rowid, \"{column}\" FROM \"{table}\" WHERE \"{column}\" IS NOT NULL"
        ))
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| e.to_string())?;

    let mut pending: Vec<(i64, String)> = Vec::new();
    for row in rows {
        let (rowid, value) = row.map_err(|e| e.to_string())?;
        if value.is_empty() || looks_encrypted(&value) {
            continue;
        }
        let token = vault.encrypt(&value).map_err(|e| e.to_string())?;
        pending.push((rowid, token));
    }

    let mut update = conn
        .prepare(&format!(
            "UPDATE \"{table}\" SET \"{column}\" = ?1 WHERE rowid = ?2"
        ))
        .map_err(|e| e.to_string())?;
    let mut fixed = 0u32;
    for (rowid, token) in pending {
        update
            .execute(rusqlite::params![token, rowid])
            .map_err(|e| e.to_string())?;
        fixed += 1;
    }

    if fixed > 0 {
        tracing::info!(table, column, fixed, "force-encrypted plaintext values");
    }
    Ok(fixed)
}
