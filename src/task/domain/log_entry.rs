//! Audit record written once at the end of every carry-forward run.

use super::{OwnerId, ParseRunStatusError, RunId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a carry-forward run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every carry-forward write succeeded.
    Success,
    /// The run aborted or only partially wrote its drafts.
    Failure,
}

impl RunStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }
}

impl TryFrom<&str> for RunStatus {
    type Error = ParseRunStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            _ => Err(ParseRunStatusError(value.to_owned())),
        }
    }
}

/// Per-owner tally of carried tasks, ordered by owner identifier.
pub type OwnerCounts = BTreeMap<OwnerId, usize>;

/// Immutable summary of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    run_id: RunId,
    run_date: NaiveDate,
    per_owner_counts: OwnerCounts,
    status: RunStatus,
    message: Option<String>,
}

impl LogEntry {
    /// Creates a successful run entry.
    #[must_use]
    pub const fn success(
        run_id: RunId,
        run_date: NaiveDate,
        per_owner_counts: OwnerCounts,
        message: Option<String>,
    ) -> Self {
        Self {
            run_id,
            run_date,
            per_owner_counts,
            status: RunStatus::Success,
            message,
        }
    }

    /// Creates a failed run entry. Counts cover the writes that did land.
    #[must_use]
    pub fn failure(
        run_id: RunId,
        run_date: NaiveDate,
        per_owner_counts: OwnerCounts,
        message: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            run_date,
            per_owner_counts,
            status: RunStatus::Failure,
            message: Some(message.into()),
        }
    }

    /// Returns the run identifier.
    #[must_use]
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the day the run carried tasks into.
    #[must_use]
    pub const fn run_date(&self) -> NaiveDate {
        self.run_date
    }

    /// Returns the total number of carried tasks across owners.
    #[must_use]
    pub fn carried_count(&self) -> usize {
        self.per_owner_counts.values().sum()
    }

    /// Returns the number of carried tasks per owner.
    #[must_use]
    pub const fn per_owner_counts(&self) -> &OwnerCounts {
        &self.per_owner_counts
    }

    /// Returns the run outcome.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns the human-readable message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
