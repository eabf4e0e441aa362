//! In-memory task store with scripted fault injection.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{LogEntry, OwnerId, RawTaskRecord, TaskDraft},
    ports::{StoreOperation, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Scripted failure for one store operation.
///
/// The first `after` calls succeed, the following `times` calls fail with
/// `error`, and later calls succeed again.
#[derive(Debug, Clone)]
pub struct Fault {
    after: usize,
    times: usize,
    error: TaskStoreError,
}

impl Fault {
    /// Creates a fault that fails every call with `error`.
    #[must_use]
    pub const fn new(error: TaskStoreError) -> Self {
        Self {
            after: 0,
            times: usize::MAX,
            error,
        }
    }

    /// Lets the first `calls` calls succeed before failing.
    #[must_use]
    pub const fn after(mut self, calls: usize) -> Self {
        self.after = calls;
        self
    }

    /// Limits the number of failing calls.
    #[must_use]
    pub const fn times(mut self, calls: usize) -> Self {
        self.times = calls;
        self
    }

    fn applies_to(&self, call_index: usize) -> bool {
        call_index >= self.after && call_index - self.after < self.times
    }
}

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    records: Vec<RawTaskRecord>,
    created: Vec<TaskDraft>,
    logs: Vec<LogEntry>,
    faults: HashMap<StoreOperation, Fault>,
    calls: HashMap<StoreOperation, usize>,
    next_id: u64,
}

impl InMemoryStoreState {
    /// Counts the call and returns the scripted error, if any.
    fn begin(&mut self, operation: StoreOperation) -> TaskStoreResult<()> {
        let counter = self.calls.entry(operation).or_default();
        let call_index = *counter;
        *counter += 1;
        match self.faults.get(&operation) {
            Some(fault) if fault.applies_to(call_index) => Err(fault.error.clone()),
            _ => Ok(()),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::Unavailable(format!("in-memory store lock poisoned: {err}"))
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = RawTaskRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.records.extend(records);
        }
        store
    }

    /// Adds a record as if a user had entered it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn insert(&self, record: RawTaskRecord) -> TaskStoreResult<()> {
        self.state.write().map_err(poisoned)?.records.push(record);
        Ok(())
    }

    /// Installs a scripted fault, replacing any previous one for the same
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the state lock is
    /// poisoned.
    pub fn inject(&self, operation: StoreOperation, fault: Fault) -> TaskStoreResult<()> {
        self.state
            .write()
            .map_err(poisoned)?
            .faults
            .insert(operation, fault);
        Ok(())
    }

    /// Returns how many times `operation` has been called, failed calls
    /// included.
    #[must_use]
    pub fn calls(&self, operation: StoreOperation) -> usize {
        self.state
            .read()
            .map(|state| state.calls.get(&operation).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Returns the drafts written by successful `create_task` calls.
    #[must_use]
    pub fn created(&self) -> Vec<TaskDraft> {
        self.state
            .read()
            .map(|state| state.created.clone())
            .unwrap_or_default()
    }

    /// Returns the log entries written by successful `append_log` calls.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.state
            .read()
            .map(|state| state.logs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_tasks(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
    ) -> TaskStoreResult<Vec<RawTaskRecord>> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.begin(StoreOperation::FetchTasks)?;
        Ok(state
            .records
            .iter()
            .filter(|record| {
                record.date == Some(date) && record.owner.as_deref() == Some(owner.as_str())
            })
            .cloned()
            .collect())
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.begin(StoreOperation::CreateTask)?;
        state.next_id += 1;
        let record = RawTaskRecord::new(format!("mem-{}", state.next_id))
            .with_title(draft.title())
            .with_owner(draft.owner().as_str())
            .with_completed(draft.completed())
            .with_date(draft.date());
        state.records.push(record);
        state.created.push(draft.clone());
        Ok(())
    }

    async fn append_log(&self, entry: &LogEntry) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.begin(StoreOperation::AppendLog)?;
        state.logs.push(entry.clone());
        Ok(())
    }
}
