use crate::cli::commands::log_op;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::create_record;
use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date;

/// Record a single day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date: d, entry } = cmd {
        let raw_date = d
            .clone()
            .unwrap_or_else(|| date::to_canonical(&date::today()));

        let fields = entry.to_raw(raw_date).into_fields();

        if !date::is_canonical(&fields.date) {
            warning(format!(
                "'{}' is not a recognized date; it will be stored as written.",
                fields.date
            ));
        }

        let mut pool = DbPool::open(cfg)?;

        if let Some(existing) = pool.get_by_date(&fields.date)? {
            warning(format!(
                "Record #{} already holds {}.",
                existing.id, fields.date
            ));
        }

        let rec = create_record(&mut pool, &fields)?;

        log_op(
            &pool.conn,
            "add",
            &rec.date,
            &format!("Added record #{}", rec.id),
        );

        success(format!(
            "Added record #{} for {} (rolling in office: {}).",
            rec.id,
            date::display(&rec.date),
            rec.rolling_in_office_count.unwrap_or(0)
        ));
    }

    Ok(())
}
