use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Nullable columns of `attendance`, in schema order. Legacy tables missing
/// any of them get it added by [`migrate_add_missing_columns`].
const OPTIONAL_COLUMNS: &[(&str, &str)] = &[
    ("work_location", "TEXT"),
    ("work_city", "TEXT"),
    ("day", "TEXT"),
    ("year_week", "INTEGER"),
    ("notes", "TEXT"),
    ("blockers", "TEXT"),
    ("in_flight", "TEXT"),
    ("rolling_in_office_count", "INTEGER"),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `attendance` table exists.
fn attendance_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='attendance'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn attendance_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('attendance')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Create the `attendance` table with the current schema.
///
/// `date` is indexed but not UNIQUE: one record per date is enforced by the
/// importer, not by the database.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id                       INTEGER PRIMARY KEY AUTOINCREMENT,
            date                     TEXT NOT NULL,
            work_location            TEXT,
            work_city                TEXT,
            day                      TEXT,
            year_week                INTEGER,
            notes                    TEXT,
            blockers                 TEXT,
            in_flight                TEXT,
            rolling_in_office_count  INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Add columns that older `attendance` tables do not have yet.
fn migrate_add_missing_columns(conn: &Connection) -> Result<()> {
    let existing = attendance_columns(conn)?;

    for (name, sql_type) in OPTIONAL_COLUMNS {
        if existing.iter().any(|c| c == name) {
            continue;
        }

        let version = format!("attendance_add_{name}");
        warning(format!("Adding '{}' column to attendance table...", name));

        conn.execute(
            &format!("ALTER TABLE attendance ADD COLUMN {name} {sql_type};"),
            [],
        )
        .map_err(|e| {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add '{}' column: {}", name, e)),
            )
        })?;

        // a re-created column must not be recorded twice
        if !migration_applied(conn, &version)? {
            mark_migration_applied(conn, &version, &format!("Added {name} to attendance"))?;
        }

        success(format!("Migration applied: {} → added '{}'", version, name));
    }

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !attendance_table_exists(conn)? {
        create_attendance_table(conn)?;
        success("Created attendance table.");
        return Ok(());
    }

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);")?;
    migrate_add_missing_columns(conn)?;

    Ok(())
}
