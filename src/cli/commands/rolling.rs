use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::rolling::RollingLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rolling { date: raw } = cmd {
        let d = date::normalize(raw.trim());
        if !date::is_canonical(&d) {
            return Err(AppError::InvalidDate(raw.clone()));
        }

        let pool = DbPool::open(cfg)?;
        let count = RollingLogic::compute(&pool, &d)?;

        success(format!(
            "{}: {} day(s) in office over the last {} days.",
            date::display(&d),
            count,
            pool.window.days
        ));
    }

    Ok(())
}
