//! SQL for the `attendance` table and the SQLite side of `AttendanceStore`.

use crate::core::rolling::RollingWindow;
use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceFields, AttendanceRecord};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeSet;

const SELECT_COLUMNS: &str = "id, date, work_location, work_city, day, year_week,
     notes, blockers, in_flight, rolling_in_office_count";

pub fn map_row(row: &Row) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.get("id")?,
        date: row.get("date")?,
        work_location: row.get("work_location")?,
        work_city: row.get("work_city")?,
        day: row.get("day")?,
        year_week: row.get("year_week")?,
        notes: row.get("notes")?,
        blockers: row.get("blockers")?,
        in_flight: row.get("in_flight")?,
        rolling_in_office_count: row.get("rolling_in_office_count")?,
    })
}

pub fn load_by_id(conn: &Connection, id: i64) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM attendance WHERE id = ?1");
    let rec = conn.query_row(&sql, [id], map_row).optional()?;
    Ok(rec)
}

pub fn load_by_date(conn: &Connection, date: &str) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM attendance
         WHERE date = ?1
         ORDER BY id ASC
         LIMIT 1"
    );
    let rec = conn.query_row(&sql, [date], map_row).optional()?;
    Ok(rec)
}

pub fn load_all(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM attendance ORDER BY date ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_attendance(
    conn: &Connection,
    f: &AttendanceFields,
    rolling_count: i64,
) -> AppResult<AttendanceRecord> {
    let sql = format!(
        "INSERT INTO attendance (date, work_location, work_city, day, year_week,
                                 notes, blockers, in_flight, rolling_in_office_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         RETURNING {SELECT_COLUMNS}"
    );

    let rec = conn.query_row(
        &sql,
        params![
            f.date,
            f.work_location,
            f.work_city,
            f.day,
            f.year_week,
            f.notes,
            f.blockers,
            f.in_flight,
            rolling_count,
        ],
        map_row,
    )?;
    Ok(rec)
}

/// Update all mutable fields of `id`; `None` when no such row exists.
pub fn update_attendance(
    conn: &Connection,
    id: i64,
    f: &AttendanceFields,
    rolling_count: i64,
) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!(
        "UPDATE attendance
         SET date = ?1, work_location = ?2, work_city = ?3, day = ?4,
             year_week = ?5, notes = ?6, blockers = ?7, in_flight = ?8,
             rolling_in_office_count = ?9
         WHERE id = ?10
         RETURNING {SELECT_COLUMNS}"
    );

    let rec = conn
        .query_row(
            &sql,
            params![
                f.date,
                f.work_location,
                f.work_city,
                f.day,
                f.year_week,
                f.notes,
                f.blockers,
                f.in_flight,
                rolling_count,
                id,
            ],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

pub fn delete_attendance(conn: &Connection, id: i64) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM attendance WHERE id = ?1", [id])?;
    Ok(n > 0)
}

/// Distinct in-office dates in `[date(anchor, -(days-1) days), end]`.
///
/// Dates are compared as text, which orders correctly for canonical
/// `YYYY-MM-DD`. An anchor that SQLite cannot read as a date makes the lower
/// bound NULL, so the count is 0. Locations are matched in Rust with
/// [`RollingWindow::is_in_office`], since SQLite's `LOWER()` only folds ASCII.
pub fn count_in_office_window(
    conn: &Connection,
    window: &RollingWindow,
    anchor: &str,
    end: &str,
) -> AppResult<i64> {
    if window.normalized_locations().is_empty() {
        return Ok(0);
    }

    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT date, work_location FROM attendance
         WHERE date >= date(?1, ?3)
           AND date <= ?2
           AND work_location IS NOT NULL",
    )?;

    let rows = stmt.query_map(
        params![anchor, end, window.lower_bound_modifier()],
        |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
    )?;

    let mut dates = BTreeSet::new();
    for r in rows {
        let (date, location) = r?;
        if window.is_in_office(&location) {
            dates.insert(date);
        }
    }

    Ok(dates.len() as i64)
}

impl AttendanceStore for DbPool {
    fn get_by_id(&self, id: i64) -> AppResult<Option<AttendanceRecord>> {
        load_by_id(&self.conn, id)
    }

    fn get_by_date(&self, date: &str) -> AppResult<Option<AttendanceRecord>> {
        load_by_date(&self.conn, date)
    }

    fn list_all(&self) -> AppResult<Vec<AttendanceRecord>> {
        load_all(&self.conn)
    }

    fn create(
        &mut self,
        fields: &AttendanceFields,
        rolling_count: i64,
    ) -> AppResult<AttendanceRecord> {
        insert_attendance(&self.conn, fields, rolling_count)
    }

    fn update(
        &mut self,
        id: i64,
        fields: &AttendanceFields,
        rolling_count: i64,
    ) -> AppResult<AttendanceRecord> {
        update_attendance(&self.conn, id, fields, rolling_count)?
            .ok_or(AppError::RecordNotFound(id))
    }

    fn delete(&mut self, id: i64) -> AppResult<bool> {
        delete_attendance(&self.conn, id)
    }

    fn count_in_window(&self, window_anchor: &str, window_end: &str) -> AppResult<i64> {
        count_in_office_window(&self.conn, &self.window, window_anchor, window_end)
    }
}
