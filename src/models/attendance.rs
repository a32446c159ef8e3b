//! Attendance entry model: the stored record, its mutable field set and
//! the raw text form coming from CLI flags or CSV rows.

use crate::utils::date;
use serde::Serialize;

/// Number of positional fields an import row must carry.
pub const ROW_FIELDS: usize = 8;

/// A stored attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub date: String,
    pub work_location: Option<String>,
    pub work_city: Option<String>,
    pub day: Option<String>,
    pub year_week: Option<i64>,
    pub notes: Option<String>,
    pub blockers: Option<String>,
    pub in_flight: Option<String>,
    /// Derived at write time, never user supplied.
    pub rolling_in_office_count: Option<i64>,
}

impl AttendanceRecord {
    /// The mutable part of the record, e.g. as a base for an edit.
    pub fn fields(&self) -> AttendanceFields {
        AttendanceFields {
            date: self.date.clone(),
            work_location: self.work_location.clone(),
            work_city: self.work_city.clone(),
            day: self.day.clone(),
            year_week: self.year_week,
            notes: self.notes.clone(),
            blockers: self.blockers.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

/// Everything a create/update writes, except `id` and the rolling count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFields {
    pub date: String,
    pub work_location: Option<String>,
    pub work_city: Option<String>,
    pub day: Option<String>,
    pub year_week: Option<i64>,
    pub notes: Option<String>,
    pub blockers: Option<String>,
    pub in_flight: Option<String>,
}

/// Untrimmed text as submitted, one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAttendance {
    pub date: String,
    pub work_location: String,
    pub work_city: String,
    pub day: String,
    pub year_week: String,
    pub notes: String,
    pub blockers: String,
    pub in_flight: String,
}

impl RawAttendance {
    /// Positional CSV layout:
    /// `date, work_location, work_city, day, year_week, notes, blockers, in_flight`.
    /// Extra trailing columns (the exported rolling count) are ignored.
    /// Returns `None` for rows shorter than [`ROW_FIELDS`].
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Option<Self> {
        if row.len() < ROW_FIELDS {
            return None;
        }
        let f = |i: usize| row[i].as_ref().to_string();
        Some(Self {
            date: f(0),
            work_location: f(1),
            work_city: f(2),
            day: f(3),
            year_week: f(4),
            notes: f(5),
            blockers: f(6),
            in_flight: f(7),
        })
    }

    /// Trim, drop empty values and normalize the date.
    ///
    /// The date keeps its literal text when it does not parse; see
    /// [`date::normalize`].
    pub fn into_fields(self) -> AttendanceFields {
        let raw_date = self.date.trim().trim_matches('"').trim();

        AttendanceFields {
            date: date::normalize(raw_date),
            work_location: non_empty(&self.work_location),
            work_city: non_empty(&self.work_city),
            day: non_empty(&self.day),
            year_week: parse_year_week(&self.year_week),
            notes: non_empty(&self.notes),
            blockers: non_empty(&self.blockers),
            in_flight: non_empty(&self.in_flight),
        }
    }
}

/// `None` when the trimmed value is empty.
pub fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Year-week is only kept when it parses to a positive integer.
pub fn parse_year_week(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok().filter(|w| *w > 0)
}
