//! Task records as fetched from the remote store and the drafts carried
//! forward from them.

use super::{OwnerId, SourceId, TaskDomainError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Loosely-typed task record as produced by a store adapter.
///
/// Only the remote identifier is guaranteed; every other field may be absent
/// when the remote row is malformed. Convert with [`TaskRecord::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTaskRecord {
    /// Remote identifier of the row.
    pub source_id: String,
    /// Task title, if present.
    pub title: Option<String>,
    /// Assigned owner, if present.
    pub owner: Option<String>,
    /// Completion flag, if present.
    pub completed: Option<bool>,
    /// Day the task is listed under, if present.
    pub date: Option<NaiveDate>,
}

impl RawTaskRecord {
    /// Creates a raw record carrying only its remote identifier.
    #[must_use]
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the listed date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Validated task record listed under a single day.
///
/// Identity is the pair of remote identifier and date. Titles are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    source_id: SourceId,
    title: String,
    owner: OwnerId,
    completed: bool,
    date: NaiveDate,
}

impl TaskRecord {
    /// Creates a record from already validated parts.
    #[must_use]
    pub const fn new(
        source_id: SourceId,
        title: String,
        owner: OwnerId,
        completed: bool,
        date: NaiveDate,
    ) -> Self {
        Self {
            source_id,
            title,
            owner,
            completed,
            date,
        }
    }

    /// Validates a raw adapter record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] when the title, owner,
    /// completion flag or date is absent, and the identifier errors when the
    /// owner or source identifier is blank.
    pub fn from_raw(raw: RawTaskRecord) -> Result<Self, TaskDomainError> {
        let RawTaskRecord {
            source_id,
            title,
            owner,
            completed,
            date,
        } = raw;
        let missing = |field: &'static str| TaskDomainError::MissingField {
            source_id: source_id.clone(),
            field,
        };

        let title_value = title.ok_or_else(|| missing("title"))?;
        let owner_value = owner.ok_or_else(|| missing("owner"))?;
        let completed_value = completed.ok_or_else(|| missing("completed"))?;
        let date_value = date.ok_or_else(|| missing("date"))?;

        Ok(Self {
            source_id: SourceId::new(source_id)?,
            title: title_value,
            owner: OwnerId::new(owner_value)?,
            completed: completed_value,
            date: date_value,
        })
    }

    /// Returns the remote identifier.
    #[must_use]
    pub const fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns whether the task has been marked completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the day the task is listed under.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Builds the draft that lists this task again under `today`.
    ///
    /// Title and owner are preserved; the draft is never completed.
    #[must_use]
    pub fn carry_to(&self, today: NaiveDate) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            owner: self.owner.clone(),
            completed: false,
            date: today,
            carried_from: self.source_id.clone(),
        }
    }
}

/// Task record that a carry-forward will create in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: String,
    owner: OwnerId,
    completed: bool,
    date: NaiveDate,
    carried_from: SourceId,
}

impl TaskDraft {
    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the completion flag, which is always `false` for new drafts.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the day the draft will be listed under.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the remote identifier of the record this draft was copied from.
    #[must_use]
    pub const fn carried_from(&self) -> &SourceId {
        &self.carried_from
    }
}
