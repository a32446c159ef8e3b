use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL RECORDS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) OFFICE SHARE
    //
    if count > 0 {
        let mut stmt = pool
            .conn
            .prepare("SELECT work_location FROM attendance WHERE work_location IS NOT NULL")?;
        let mut office = 0_i64;
        for loc in stmt.query_map([], |row| row.get::<_, String>(0))? {
            if pool.window.is_in_office(&loc?) {
                office += 1;
            }
        }
        let share = office as f64 * 100.0 / count as f64;
        println!(
            "{}• In office:{} {} ({:.1}%)",
            CYAN, RESET, office, share
        );
    }

    //
    // 5) SPAN IN DAYS (only when both ends are real dates)
    //
    if let (Some(f), Some(l)) = (first_date, last_date)
        && let (Some(d1), Some(d2)) = (parse_date(&f), parse_date(&l))
    {
        let days = (d2 - d1).num_days() + 1;
        println!("{}• Span:{} {} days", CYAN, RESET, days);
    }

    println!();
    Ok(())
}
