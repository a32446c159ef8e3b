use crate::cli::commands::log_op;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database file
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    info("Initializing rAttendance…");

    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    log_op(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_str),
    );

    success(format!("Database initialized at {}", db_str));
    Ok(())
}
