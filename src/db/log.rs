use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Append one row to the internal `log` table, stamped with local RFC 3339 time.
///
/// `target` is the affected date, file or version; it may be empty.
pub fn record_operation(
    conn: &Connection,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;

    Ok(())
}
