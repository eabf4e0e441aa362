//! Domain model for the daily task carry-forward.
//!
//! Records arrive from a store adapter in their loosely-typed
//! [`RawTaskRecord`] shape and are validated into [`TaskRecord`]s once, at
//! ingestion. Nothing in this module performs I/O.

mod error;
mod ids;
mod log_entry;
mod record;

pub use error::{ParseRunStatusError, TaskDomainError};
pub use ids::{OwnerId, RunId, SourceId};
pub use log_entry::{LogEntry, OwnerCounts, RunStatus};
pub use record::{RawTaskRecord, TaskDraft, TaskRecord};
