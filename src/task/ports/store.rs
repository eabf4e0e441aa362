//! Store port for reading a day's tasks and writing carried drafts and run
//! logs.

use crate::task::domain::{LogEntry, OwnerId, RawTaskRecord, TaskDraft};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Operation exposed by the store port, used for error reporting and
/// fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// [`TaskStore::fetch_tasks`].
    FetchTasks,
    /// [`TaskStore::create_task`].
    CreateTask,
    /// [`TaskStore::append_log`].
    AppendLog,
}

impl StoreOperation {
    /// Returns a short operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchTasks => "fetch_tasks",
            Self::CreateTask => "create_task",
            Self::AppendLog => "append_log",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Remote task store contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the records listed under `date` for `owner`, in store order.
    ///
    /// Records are returned unvalidated; callers ingest them.
    async fn fetch_tasks(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
    ) -> TaskStoreResult<Vec<RawTaskRecord>>;

    /// Creates a new task record from a draft.
    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<()>;

    /// Appends a run log entry.
    async fn append_log(&self, entry: &LogEntry) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The store could not be reached or asked the caller to back off.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the request, for example on bad credentials.
    #[error("store rejected request with status {status}: {message}")]
    Rejected {
        /// HTTP-style status code reported by the store.
        status: u16,
        /// Message returned by the store.
        message: String,
    },

    /// The store answered with a body that could not be decoded.
    #[error("undecodable store response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a decoding error.
    #[must_use]
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Returns whether retrying the same call may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
