use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::rolling::RollingWindow;
use crate::core::store::AttendanceStore;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::date;
use crate::utils::path::expand_tilde;
use std::collections::BTreeMap;
use std::fs;

fn print_window(window: &RollingWindow) {
    info(format!(
        "In-office window: {} days, locations: {}",
        window.days,
        window.office_locations.join(", ")
    ));
}

/// SQLite integrity plus attendance-level checks: dates that never
/// normalized and dates held by more than one record.
fn run_checks(pool: &DbPool) -> AppResult<bool> {
    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    let mut clean = integrity == "ok";
    if !clean {
        error(format!("Integrity check failed: {}", integrity));
    }

    let records = pool.list_all()?;

    let unparsed: Vec<i64> = records
        .iter()
        .filter(|r| !date::is_canonical(&r.date))
        .map(|r| r.id)
        .collect();
    if !unparsed.is_empty() {
        clean = false;
        warning(format!(
            "{} record(s) with an unparsed date: {:?}",
            unparsed.len(),
            unparsed
        ));
    }

    let mut per_date: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for r in &records {
        per_date.entry(r.date.as_str()).or_default().push(r.id);
    }
    let shared: Vec<_> = per_date.iter().filter(|(_, ids)| ids.len() > 1).collect();
    if !shared.is_empty() {
        clean = false;
        warning(format!(
            "{} date(s) held by more than one record:",
            shared.len()
        ));
        for (d, ids) in shared {
            println!("    {} -> {:?}", d, ids);
        }
    }

    Ok(clean)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let db_path = expand_tilde(&cfg.database);
        // plain open; --migrate, --info and --check bring the schema up to date
        let pool = DbPool::new(&cfg.database)?.with_window(RollingWindow::from_config(cfg));

        if *migrate {
            header("Migrations");
            init_db(&pool.conn)?;
            success("Schema is up to date.");
        }

        if *show_info {
            init_db(&pool.conn)?;
            header("Database");
            print_window(&pool.window);
            stats::print_db_info(&pool, &db_path.to_string_lossy())?;
        }

        if *check {
            init_db(&pool.conn)?;
            header("Checks");
            print_window(&pool.window);
            if run_checks(&pool)? {
                success("All checks passed.");
            }
        }

        if *vacuum {
            let before = fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);
            pool.conn.execute_batch("VACUUM;")?;
            let after = fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);
            success(format!(
                "Vacuum completed: {} -> {} bytes.",
                before, after
            ));
        }
    }

    Ok(())
}
