//! Persistence boundary used by the attendance engine.
//!
//! The engine never talks SQL: everything it needs from storage goes through
//! this trait. `DbPool` implements it on top of SQLite (see `db::queries`).

use crate::errors::AppResult;
use crate::models::attendance::{AttendanceFields, AttendanceRecord};

pub trait AttendanceStore {
    fn get_by_id(&self, id: i64) -> AppResult<Option<AttendanceRecord>>;

    /// First record (lowest id) holding `date`, if any.
    fn get_by_date(&self, date: &str) -> AppResult<Option<AttendanceRecord>>;

    /// All records, ascending by date, ties in insertion order.
    fn list_all(&self) -> AppResult<Vec<AttendanceRecord>>;

    fn create(
        &mut self,
        fields: &AttendanceFields,
        rolling_count: i64,
    ) -> AppResult<AttendanceRecord>;

    /// Full replace of the mutable fields. Fails with `RecordNotFound`
    /// when `id` does not exist.
    fn update(
        &mut self,
        id: i64,
        fields: &AttendanceFields,
        rolling_count: i64,
    ) -> AppResult<AttendanceRecord>;

    /// `false` when no row had that id.
    fn delete(&mut self, id: i64) -> AppResult<bool>;

    /// Distinct in-office dates inside the trailing window. The window starts
    /// `days - 1` days before `window_anchor` and ends at `window_end`;
    /// width and in-office predicate are the store's configuration.
    fn count_in_window(&self, window_anchor: &str, window_end: &str) -> AppResult<i64>;
}
