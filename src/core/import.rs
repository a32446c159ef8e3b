//! CSV batch import.
//!
//! Rows are reconciled one by one against the store. There is no
//! transaction around the batch: when a store failure stops the import, the
//! rows written before it stay written and the error carries the counters
//! accumulated so far.

use crate::core::reconcile::{ReconcileOutcome, reconcile_one};
use crate::core::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::RawAttendance;
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub inserted: usize,
    pub skipped: usize,
    pub updated: usize,
    /// Rows whose date was empty or did not parse.
    pub rejected: usize,
    /// Rows with fewer than eight fields.
    pub malformed: usize,
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} skipped",
            self.inserted, self.updated, self.skipped
        )
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Import tokenized CSV rows. The first row is the header.
    pub fn import_batch<S, R>(
        store: &mut S,
        rows: &[R],
        overwrite: bool,
    ) -> AppResult<ImportOutcome>
    where
        S: AttendanceStore + ?Sized,
        R: AsRef<[String]>,
    {
        if rows.len() < 2 {
            return Err(AppError::MalformedImport(
                "CSV must have at least a header row and one data row".into(),
            ));
        }

        let mut outcome = ImportOutcome::default();

        for row in &rows[1..] {
            let Some(raw) = RawAttendance::from_row(row.as_ref()) else {
                outcome.malformed += 1;
                continue;
            };

            match reconcile_one(&mut *store, raw.into_fields(), overwrite) {
                Ok(ReconcileOutcome::Inserted(_)) => outcome.inserted += 1,
                Ok(ReconcileOutcome::Updated(_)) => outcome.updated += 1,
                Ok(ReconcileOutcome::Skipped(_)) => outcome.skipped += 1,
                Ok(ReconcileOutcome::Rejected(_)) => outcome.rejected += 1,
                Err(e) => {
                    return Err(AppError::ImportAborted {
                        outcome,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(outcome)
    }
}

/// Tokenize a CSV file. Headers are left in place and rows may have any
/// length; shape checks happen in [`ImportLogic::import_batch`].
/// Invalid UTF-8 bytes become U+FFFD.
pub fn read_csv_rows(path: &Path) -> AppResult<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::MalformedImport(format!("Failed to open CSV: {e}")))?;

    let mut rows = Vec::new();
    for rec in rdr.byte_records() {
        let rec = rec.map_err(|e| AppError::MalformedImport(format!("Failed to parse CSV: {e}")))?;
        rows.push(
            rec.iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        );
    }

    Ok(rows)
}
