#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::core::rolling::RollingWindow;
use rattendance::db::pool::DbPool;
use rattendance::models::attendance::{AttendanceFields, RawAttendance};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rta() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temp CSV file and return its path
pub fn write_csv(name: &str, content: &str) -> String {
    let p = temp_out(name, "csv");
    fs::write(&p, content).expect("write csv");
    p
}

pub const HEADER: &str =
    "date,work_location,work_city,day,year_week,notes,blockers,in_flight";

/// Fresh migrated in-memory store with the default window (90 days, "Office")
pub fn memory_pool() -> DbPool {
    DbPool::in_memory(RollingWindow::default()).expect("in-memory db")
}

pub fn memory_pool_with(days: u32, office: &[&str]) -> DbPool {
    DbPool::in_memory(RollingWindow {
        days,
        office_locations: office.iter().map(|s| s.to_string()).collect(),
    })
    .expect("in-memory db")
}

/// Owned CSV row from string slices
pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

pub fn header_row() -> Vec<String> {
    HEADER.split(',').map(str::to_string).collect()
}

/// Normalized fields with just a date and a location
pub fn entry(date: &str, location: &str) -> AttendanceFields {
    RawAttendance {
        date: date.to_string(),
        work_location: location.to_string(),
        ..Default::default()
    }
    .into_fields()
}

/// Initialize an empty test DB through the CLI
pub fn init_db(db_path: &str) {
    rta()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
