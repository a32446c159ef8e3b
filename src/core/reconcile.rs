//! Per-record write decisions shared by single edits and CSV import.

use crate::core::rolling::RollingLogic;
use crate::core::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceFields, AttendanceRecord};
use crate::utils::date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Inserted(AttendanceRecord),
    Updated(AttendanceRecord),
    /// The date already exists (id of the stored record) and overwrite is off.
    Skipped(i64),
    /// The date is empty or did not normalize; carries the offending text.
    Rejected(String),
}

/// Decide insert / update / skip / reject for one incoming entry and write it.
///
/// The rolling count is computed for the incoming date right before the
/// write, so a historical row is measured against its own window.
pub fn reconcile_one<S: AttendanceStore + ?Sized>(
    store: &mut S,
    incoming: AttendanceFields,
    overwrite: bool,
) -> AppResult<ReconcileOutcome> {
    if incoming.date.is_empty() || !date::is_canonical(&incoming.date) {
        return Ok(ReconcileOutcome::Rejected(incoming.date));
    }

    match store.get_by_date(&incoming.date)? {
        None => {
            let count = RollingLogic::compute(&*store, &incoming.date)?;
            let rec = store.create(&incoming, count)?;
            Ok(ReconcileOutcome::Inserted(rec))
        }
        Some(existing) if overwrite => {
            let count = RollingLogic::compute(&*store, &incoming.date)?;
            let rec = store.update(existing.id, &incoming, count)?;
            Ok(ReconcileOutcome::Updated(rec))
        }
        Some(existing) => Ok(ReconcileOutcome::Skipped(existing.id)),
    }
}

/// Direct insert. No duplicate-date lookup and no date validation: a date
/// that did not normalize is stored literally.
pub fn create_record<S: AttendanceStore + ?Sized>(
    store: &mut S,
    fields: &AttendanceFields,
) -> AppResult<AttendanceRecord> {
    let count = RollingLogic::compute(&*store, &fields.date)?;
    store.create(fields, count)
}

/// Full replace of the mutable fields of `id`.
///
/// Moving a record onto a date that another record already holds fails with
/// `DuplicateDate`. Keeping the record's own date is always allowed.
pub fn update_record<S: AttendanceStore + ?Sized>(
    store: &mut S,
    id: i64,
    fields: &AttendanceFields,
) -> AppResult<AttendanceRecord> {
    let current = store.get_by_id(id)?.ok_or(AppError::RecordNotFound(id))?;

    if current.date != fields.date
        && let Some(holder) = store.get_by_date(&fields.date)?
    {
        return Err(AppError::DuplicateDate {
            date: fields.date.clone(),
            holder: holder.id,
        });
    }

    let count = RollingLogic::compute(&*store, &fields.date)?;
    store.update(id, fields, count)
}

pub fn delete_record<S: AttendanceStore + ?Sized>(store: &mut S, id: i64) -> AppResult<()> {
    if store.delete(id)? {
        Ok(())
    } else {
        Err(AppError::RecordNotFound(id))
    }
}
