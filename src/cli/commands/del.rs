use crate::cli::commands::log_op;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::delete_record;
use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut pool = DbPool::open(cfg)?;

        let rec = pool.get_by_id(*id)?.ok_or(AppError::RecordNotFound(*id))?;

        let prompt = format!(
            "Delete record #{} ({})? This action is irreversible.",
            rec.id,
            date::display(&rec.date)
        );

        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        delete_record(&mut pool, *id)?;

        log_op(&pool.conn, "del", &rec.date, &format!("Deleted record #{}", id));
        success(format!("Record #{} has been deleted.", id));
    }

    Ok(())
}
