mod common;
use common::{entry, memory_pool};
use rattendance::core::reconcile::{
    ReconcileOutcome, create_record, delete_record, reconcile_one, update_record,
};
use rattendance::core::store::AttendanceStore;
use rattendance::errors::AppError;
use rattendance::models::attendance::{AttendanceFields, RawAttendance};

fn full_entry(date: &str, location: &str, notes: &str) -> AttendanceFields {
    RawAttendance {
        date: date.into(),
        work_location: location.into(),
        work_city: "Berlin".into(),
        day: "Monday".into(),
        year_week: "202502".into(),
        notes: notes.into(),
        blockers: "".into(),
        in_flight: "".into(),
    }
    .into_fields()
}

#[test]
fn test_reconcile_inserts_new_date() {
    let mut pool = memory_pool();
    create_record(&mut pool, &entry("2025-01-06", "Office")).unwrap();

    let incoming = full_entry("2025-01-07", "Office", "standup");
    let out = reconcile_one(&mut pool, incoming, false).unwrap();
    match out {
        ReconcileOutcome::Inserted(rec) => {
            assert_eq!(rec.date, "2025-01-07");
            assert_eq!(rec.work_city.as_deref(), Some("Berlin"));
            assert_eq!(rec.year_week, Some(202502));
            assert_eq!(rec.notes.as_deref(), Some("standup"));
            assert_eq!(rec.blockers, None);
            assert_eq!(rec.rolling_in_office_count, Some(1));
        }
        other => panic!("expected insert, got {:?}", other),
    }
}

#[test]
fn test_reconcile_skips_existing_without_overwrite() {
    let mut pool = memory_pool();
    let original = full_entry("2025-01-06", "Office", "original");
    let existing = create_record(&mut pool, &original).unwrap();
    let before = pool.list_all().unwrap();

    let out = reconcile_one(&mut pool, full_entry("2025-01-06", "Home", "changed"), false).unwrap();

    assert_eq!(out, ReconcileOutcome::Skipped(existing.id));
    assert_eq!(pool.list_all().unwrap(), before);
}

#[test]
fn test_reconcile_overwrite_replaces_all_fields() {
    let mut pool = memory_pool();
    let original = full_entry("2025-01-06", "Office", "original");
    let existing = create_record(&mut pool, &original).unwrap();

    let out = reconcile_one(&mut pool, entry("January 6, 2025", "Home"), true).unwrap();
    let rec = match out {
        ReconcileOutcome::Updated(rec) => rec,
        other => panic!("expected update, got {:?}", other),
    };

    assert_eq!(rec.id, existing.id);
    assert_eq!(rec.work_location.as_deref(), Some("Home"));
    assert_eq!(rec.work_city, None);
    assert_eq!(rec.notes, None);
    // the old record itself was still "Office" when the count was taken
    assert_eq!(rec.rolling_in_office_count, Some(1));
    assert_eq!(pool.list_all().unwrap().len(), 1);
}

#[test]
fn test_reconcile_rejects_bad_dates_without_writing() {
    let mut pool = memory_pool();

    let out = reconcile_one(&mut pool, entry("someday", "Office"), false).unwrap();
    assert_eq!(out, ReconcileOutcome::Rejected("someday".into()));

    let out = reconcile_one(&mut pool, entry("   ", "Office"), true).unwrap();
    assert_eq!(out, ReconcileOutcome::Rejected(String::new()));

    assert!(pool.list_all().unwrap().is_empty());
}

#[test]
fn test_create_record_keeps_unparsed_date_literally() {
    let mut pool = memory_pool();
    let rec = create_record(&mut pool, &entry("sometime in spring", "Office")).unwrap();

    assert_eq!(rec.date, "sometime in spring");
    assert_eq!(rec.rolling_in_office_count, Some(0));
    let loaded = pool.get_by_id(rec.id).unwrap().unwrap();
    assert_eq!(loaded.date, "sometime in spring");
}

#[test]
fn test_update_record_recomputes_for_new_date() {
    let mut pool = memory_pool();
    create_record(&mut pool, &entry("2025-01-06", "Office")).unwrap();
    create_record(&mut pool, &entry("2025-01-07", "Office")).unwrap();
    let moved = create_record(&mut pool, &entry("2025-01-08", "Home")).unwrap();

    let rec = update_record(&mut pool, moved.id, &entry("2024-06-01", "Office")).unwrap();
    assert_eq!(rec.date, "2024-06-01");
    assert_eq!(rec.rolling_in_office_count, Some(0));
}

#[test]
fn test_update_refuses_date_held_by_another_record() {
    let mut pool = memory_pool();
    let a = create_record(&mut pool, &entry("2025-01-06", "Office")).unwrap();
    let b = create_record(&mut pool, &entry("2025-01-07", "Home")).unwrap();

    let err = update_record(&mut pool, b.id, &entry("January 6, 2025", "Home")).unwrap_err();
    assert!(matches!(
        err,
        AppError::DuplicateDate { ref date, holder } if date == "2025-01-06" && holder == a.id
    ));

    let holders: Vec<i64> = pool
        .list_all()
        .unwrap()
        .iter()
        .filter(|r| r.date == "2025-01-06")
        .map(|r| r.id)
        .collect();
    assert_eq!(holders, vec![a.id]);
    assert_eq!(pool.get_by_id(b.id).unwrap().unwrap().date, "2025-01-07");
}

#[test]
fn test_update_keeping_own_date_is_allowed() {
    let mut pool = memory_pool();
    create_record(&mut pool, &entry("2025-01-06", "Office")).unwrap();
    // a second holder can only come from a direct create
    let second = create_record(&mut pool, &entry("2025-01-06", "Home")).unwrap();

    let rec = update_record(&mut pool, second.id, &entry("2025-01-06", "Office")).unwrap();
    assert_eq!(rec.work_location.as_deref(), Some("Office"));
}

#[test]
fn test_update_missing_id_is_not_found() {
    let mut pool = memory_pool();
    let err = update_record(&mut pool, 42, &entry("2025-01-06", "Office")).unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(42)));
}

#[test]
fn test_delete_record() {
    let mut pool = memory_pool();
    let rec = create_record(&mut pool, &entry("2025-01-06", "Office")).unwrap();

    delete_record(&mut pool, rec.id).unwrap();
    assert!(pool.get_by_id(rec.id).unwrap().is_none());

    let err = delete_record(&mut pool, rec.id).unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound(id) if id == rec.id));
}

#[test]
fn test_list_all_orders_by_date_then_insertion() {
    let mut pool = memory_pool();
    let a = create_record(&mut pool, &entry("2025-02-01", "Office")).unwrap();
    let b = create_record(&mut pool, &entry("2025-01-15", "Home")).unwrap();
    let c = create_record(&mut pool, &entry("2025-02-01", "Home")).unwrap();

    let ids: Vec<i64> = pool.list_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id, c.id]);
}

#[test]
fn test_get_by_date_returns_first_inserted() {
    let mut pool = memory_pool();
    let first = create_record(&mut pool, &entry("2025-01-06", "Office")).unwrap();
    create_record(&mut pool, &entry("2025-01-06", "Home")).unwrap();

    let found = pool.get_by_date("2025-01-06").unwrap().unwrap();
    assert_eq!(found.id, first.id);
    assert!(pool.get_by_date("2025-01-07").unwrap().is_none());
}
