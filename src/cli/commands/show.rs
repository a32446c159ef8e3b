use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::AttendanceStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, RESET, colorize_optional};
use crate::utils::date;
use crate::utils::formatting::{bold, describe_location};

const WRAP_WIDTH: usize = 72;

fn print_field(label: &str, value: Option<&str>) {
    println!("{}{:<12}{} {}", CYAN, label, RESET, colorize_optional(value));
}

/// Long text goes under its label, wrapped and indented.
fn print_block(label: &str, value: Option<&str>) {
    match value {
        Some(text) => {
            println!("{}{}{}", CYAN, label, RESET);
            let opts = textwrap::Options::new(WRAP_WIDTH)
                .initial_indent("  ")
                .subsequent_indent("  ");
            println!("{}", textwrap::fill(text, opts));
        }
        None => print_field(label, None),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let pool = DbPool::open(cfg)?;
        let rec = pool.get_by_id(*id)?.ok_or(AppError::RecordNotFound(*id))?;

        println!(
            "{}",
            bold(&format!("Record #{}: {}", rec.id, date::display(&rec.date)))
        );

        let loc_color = describe_location(rec.work_location.as_deref(), &pool.window);
        println!(
            "{}{:<12}{} {}{}{}",
            CYAN,
            "Location",
            RESET,
            loc_color,
            rec.work_location.as_deref().unwrap_or("--"),
            RESET
        );
        print_field("City", rec.work_city.as_deref());
        print_field("Day", rec.day.as_deref());
        print_field("Week", rec.year_week.map(|w| w.to_string()).as_deref());
        print_field(
            "In office",
            rec.rolling_in_office_count
                .map(|c| format!("{} / {} days", c, pool.window.days))
                .as_deref(),
        );
        print_block("Notes", rec.notes.as_deref());
        print_block("Blockers", rec.blockers.as_deref());
        print_block("In flight", rec.in_flight.as_deref());
    }

    Ok(())
}
