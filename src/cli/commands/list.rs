use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::select_records;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date;
use crate::utils::formatting::{opt_num, opt_str, truncate};
use crate::utils::table::{Column, Table};

const NOTES_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        let pool = DbPool::open(cfg)?;
        let records = select_records(&pool, period)?;

        if records.is_empty() {
            info("No attendance records found.");
            return Ok(());
        }

        header(format!(
            "Attendance ({} records, {}-day window)",
            records.len(),
            pool.window.days
        ));

        let mut table = Table::new(vec![
            Column::new("ID"),
            Column::new("Date"),
            Column::new("Location"),
            Column::new("City"),
            Column::new("Day"),
            Column::new("Week"),
            Column::new("In office"),
            Column::new("Notes"),
        ])
        .with_separator(cfg.separator());

        for rec in &records {
            table.add_row(vec![
                rec.id.to_string(),
                date::display(&rec.date),
                opt_str(&rec.work_location),
                opt_str(&rec.work_city),
                opt_str(&rec.day),
                opt_num(rec.year_week),
                opt_num(rec.rolling_in_office_count),
                truncate(&opt_str(&rec.notes), NOTES_WIDTH),
            ]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
