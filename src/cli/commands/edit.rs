use crate::cli::commands::log_op;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::update_record;
use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{non_empty, parse_year_week};
use crate::ui::messages::success;
use crate::utils::date;

/// Overlay the given options on an existing record and rewrite it.
/// An empty option value (e.g. `--notes ""`) clears the field.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date: new_date,
        entry,
    } = cmd
    {
        let mut pool = DbPool::open(cfg)?;

        let existing = pool
            .get_by_id(*id)?
            .ok_or(AppError::RecordNotFound(*id))?;

        let mut fields = existing.fields();

        if let Some(d) = new_date {
            fields.date = date::normalize(d.trim());
        }
        if let Some(v) = &entry.location {
            fields.work_location = non_empty(v);
        }
        if let Some(v) = &entry.city {
            fields.work_city = non_empty(v);
        }
        if let Some(v) = &entry.day {
            fields.day = non_empty(v);
        }
        if let Some(v) = &entry.week {
            fields.year_week = parse_year_week(v);
        }
        if let Some(v) = &entry.notes {
            fields.notes = non_empty(v);
        }
        if let Some(v) = &entry.blockers {
            fields.blockers = non_empty(v);
        }
        if let Some(v) = &entry.in_flight {
            fields.in_flight = non_empty(v);
        }

        let rec = update_record(&mut pool, *id, &fields)?;

        log_op(
            &pool.conn,
            "edit",
            &rec.date,
            &format!("Updated record #{}", rec.id),
        );

        success(format!(
            "Updated record #{} for {} (rolling in office: {}).",
            rec.id,
            date::display(&rec.date),
            rec.rolling_in_office_count.unwrap_or(0)
        ));
    }

    Ok(())
}
