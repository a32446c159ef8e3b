mod common;
use common::{HEADER, init_db, rta, setup_test_db, temp_out, write_csv};
use predicates::prelude::*;
use predicates::str::contains;
use rattendance::core::store::AttendanceStore;
use rattendance::db::pool::DbPool;
use std::fs;

fn add(db: &str, date: &str, location: &str) {
    rta()
        .args(["--db", db, "add", date, "--location", location])
        .assert()
        .success();
}

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rta()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('attendance', 'log')",
            [],
            |row| row.get(0),
        )
        .expect("query");
    assert_eq!(tables, 2);
}

#[test]
fn test_add_and_list() {
    let db_path = setup_test_db("cli_add_list");
    init_db(&db_path);

    rta()
        .args([
            "--db", &db_path, "add", "January 6, 2025", "-l", "Office", "--city", "Milan",
        ])
        .assert()
        .success()
        .stdout(contains("Added record #1 for January 6, 2025 (rolling in office: 0)."));

    add(&db_path, "2025-01-07", "Office");

    rta()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("January 6, 2025"))
        .stdout(contains("January 7, 2025"))
        .stdout(contains("Milan"));

    rta()
        .args(["--db", &db_path, "list", "--period", "2024"])
        .assert()
        .success()
        .stdout(contains("No attendance records found."));
}

#[test]
fn test_add_warns_on_duplicate_date() {
    let db_path = setup_test_db("cli_add_dup");
    init_db(&db_path);

    add(&db_path, "2025-01-06", "Office");

    rta()
        .args(["--db", &db_path, "add", "2025-01-06", "-l", "Home"])
        .assert()
        .success()
        .stdout(contains("already holds 2025-01-06"));
}

#[test]
fn test_rolling_command() {
    let db_path = setup_test_db("cli_rolling");
    init_db(&db_path);

    add(&db_path, "2025-01-06", "Office");
    add(&db_path, "2025-01-07", "Home");
    add(&db_path, "2025-01-08", "Office");

    rta()
        .args(["--db", &db_path, "rolling", "2025-01-08"])
        .assert()
        .success()
        .stdout(contains(
            "January 8, 2025: 2 day(s) in office over the last 90 days.",
        ));

    rta()
        .args(["--db", &db_path, "rolling", "yesterday-ish"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_import_and_reimport() {
    let db_path = setup_test_db("cli_import");
    init_db(&db_path);

    let csv = write_csv(
        "cli_import",
        &format!(
            "{HEADER}\n\
             2025-01-06,Office,Berlin,Mon,202502,,,\n\
             \"January 7, 2025\",Home,Berlin,Tue,202502,,,\n\
             not-a-date,Office,,,,,,\n\
             2025-01-08,Office\n"
        ),
    );

    rta()
        .args(["--db", &db_path, "import", &csv])
        .assert()
        .success()
        .stdout(contains("Inserted: 2"))
        .stdout(contains("Import completed."))
        .stdout(contains("Rejected (invalid date): 1"))
        .stdout(contains("Malformed rows dropped: 1"));

    rta()
        .args(["--db", &db_path, "import", &csv])
        .assert()
        .success()
        .stdout(contains("Inserted: 0"))
        .stdout(contains("Skipped:  2"));

    rta()
        .args(["--db", &db_path, "import", &csv, "--overwrite"])
        .assert()
        .success()
        .stdout(contains("Updated:  2"));

    let pool = DbPool::new(&db_path).expect("open");
    assert_eq!(pool.list_all().expect("list").len(), 2);
}

#[test]
fn test_import_header_only_fails() {
    let db_path = setup_test_db("cli_import_header");
    init_db(&db_path);

    let csv = write_csv("cli_import_header", &format!("{HEADER}\n"));

    rta()
        .args(["--db", &db_path, "import", &csv])
        .assert()
        .failure()
        .stderr(contains("Malformed import"));
}

#[test]
fn test_import_missing_file_fails() {
    let db_path = setup_test_db("cli_import_missing");
    init_db(&db_path);

    let missing = temp_out("cli_import_missing_input", "csv");

    rta()
        .args(["--db", &db_path, "import", &missing])
        .assert()
        .failure()
        .stderr(contains("CSV file not found"));
}

#[test]
fn test_export_csv_round_trips_through_import() {
    let src_db = setup_test_db("cli_export_src");
    init_db(&src_db);
    add(&src_db, "2025-01-06", "Office");
    add(&src_db, "2025-01-07", "Home");

    let out = temp_out("cli_export_src", "csv");
    rta()
        .args(["--db", &src_db, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("date,work_location,work_city"));
    assert!(content.contains("2025-01-06,Office"));

    let dst_db = setup_test_db("cli_export_dst");
    init_db(&dst_db);
    rta()
        .args(["--db", &dst_db, "import", &out])
        .assert()
        .success()
        .stdout(contains("Inserted: 2"));

    let dst = DbPool::new(&dst_db).expect("open");
    let locations: Vec<Option<String>> = dst
        .list_all()
        .expect("list")
        .into_iter()
        .map(|r| r.work_location)
        .collect();
    assert_eq!(
        locations,
        vec![Some("Office".to_string()), Some("Home".to_string())]
    );
}

#[test]
fn test_export_json_with_range() {
    let db_path = setup_test_db("cli_export_json");
    init_db(&db_path);
    add(&db_path, "2024-12-31", "Office");
    add(&db_path, "2025-01-06", "Office");

    let out = temp_out("cli_export_json", "json");
    rta()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2025",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("json");
    let arr = parsed.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["date"], "2025-01-06");
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("cli_export_rel");
    init_db(&db_path);

    rta()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_edit_keeps_omitted_fields() {
    let db_path = setup_test_db("cli_edit");
    init_db(&db_path);

    rta()
        .args([
            "--db", &db_path, "add", "2025-01-06", "-l", "Office", "--city", "Rome",
        ])
        .assert()
        .success();

    rta()
        .args(["--db", &db_path, "edit", "1", "--notes", "Sprint planning"])
        .assert()
        .success()
        .stdout(contains("Updated record #1"));

    rta()
        .args(["--db", &db_path, "show", "1"])
        .assert()
        .success()
        .stdout(contains("Rome"))
        .stdout(contains("Sprint planning"));

    rta()
        .args(["--db", &db_path, "edit", "99", "--notes", "x"])
        .assert()
        .failure()
        .stderr(contains("Attendance record not found: 99"));
}

#[test]
fn test_edit_onto_taken_date_fails() {
    let db_path = setup_test_db("cli_edit_taken");
    init_db(&db_path);
    add(&db_path, "2025-01-06", "Office");
    add(&db_path, "2025-01-07", "Home");

    rta()
        .args(["--db", &db_path, "edit", "2", "--date", "2025-01-06"])
        .assert()
        .failure()
        .stderr(contains("Date 2025-01-06 is already held by record #1"));

    let pool = DbPool::new(&db_path).expect("open");
    let rec = pool.get_by_id(2).expect("get").expect("record 2");
    assert_eq!(rec.date, "2025-01-07");
}

#[test]
fn test_db_check_reports_shared_and_unparsed_dates() {
    let db_path = setup_test_db("cli_db_check");
    init_db(&db_path);
    add(&db_path, "2025-01-06", "Office");

    rta()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("In-office window: 90 days, locations: Office"))
        .stdout(contains("All checks passed."));

    add(&db_path, "2025-01-06", "Home");
    add(&db_path, "someday", "Home");

    rta()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("1 date(s) held by more than one record"))
        .stdout(contains("2025-01-06 -> [1, 2]"))
        .stdout(contains("1 record(s) with an unparsed date: [3]"))
        .stdout(contains("All checks passed.").not());
}

#[test]
fn test_del_with_confirmation() {
    let db_path = setup_test_db("cli_del");
    init_db(&db_path);
    add(&db_path, "2025-01-06", "Office");

    rta()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    rta()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Record #1 has been deleted."));

    rta()
        .args(["--db", &db_path, "show", "1"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db(&db_path);
    add(&db_path, "2025-01-06", "Office");

    rta()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("add").and(contains("init")));
}

#[test]
fn test_backup_copies_database() {
    let db_path = setup_test_db("cli_backup");
    init_db(&db_path);
    add(&db_path, "2025-01-06", "Office");

    let out = temp_out("cli_backup", "sqlite");
    rta()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success();

    let copy = DbPool::new(&out).expect("open backup");
    assert_eq!(copy.list_all().expect("list").len(), 1);
}

#[test]
fn test_db_info() {
    let db_path = setup_test_db("cli_db_info");
    init_db(&db_path);
    add(&db_path, "2025-01-06", "Office");
    add(&db_path, "2025-01-08", "Home");

    rta()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total records:"))
        .stdout(contains("Span:"));
}
