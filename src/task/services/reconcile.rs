//! Carry-forward reconciliation between one day's records and the next.
//!
//! These functions are pure: they never touch the store, and the same input
//! always yields the same output.

use crate::task::domain::{RawTaskRecord, TaskDomainError, TaskDraft, TaskRecord};
use chrono::NaiveDate;

/// Validates fetched records, all or nothing.
///
/// # Errors
///
/// Returns the first [`TaskDomainError`] encountered; no records are
/// returned in that case.
pub fn ingest(raw: Vec<RawTaskRecord>) -> Result<Vec<TaskRecord>, TaskDomainError> {
    raw.into_iter().map(TaskRecord::from_raw).collect()
}

/// Returns one draft dated `today` for every incomplete record, in input
/// order. Completed records are dropped and duplicate titles are kept.
#[must_use]
pub fn reconcile(records: &[TaskRecord], today: NaiveDate) -> Vec<TaskDraft> {
    records
        .iter()
        .filter(|record| !record.completed())
        .map(|record| record.carry_to(today))
        .collect()
}

/// Ingests raw records and reconciles them.
///
/// # Errors
///
/// Returns [`TaskDomainError`] when any record is malformed, without partial
/// output.
pub fn reconcile_raw(
    raw: Vec<RawTaskRecord>,
    today: NaiveDate,
) -> Result<Vec<TaskDraft>, TaskDomainError> {
    let records = ingest(raw)?;
    Ok(reconcile(&records, today))
}
