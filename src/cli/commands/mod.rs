pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod rolling;
pub mod show;

use crate::ui::messages::warning;
use rusqlite::Connection;

/// Write an internal log row; a failure only warns.
pub(crate) fn log_op(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = crate::db::log::record_operation(conn, operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
