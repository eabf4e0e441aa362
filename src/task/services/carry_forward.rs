//! Orchestration of one carry-forward run across all tracked owners.

use super::{DEFAULT_SUMMARY_TEMPLATE, RetryPolicy, reconcile_raw, render_summary};
use crate::config::{AppConfig, ConfigError};
use crate::task::{
    domain::{LogEntry, OwnerCounts, OwnerId, RunId, TaskDomainError},
    ports::{StoreOperation, TaskStore, TaskStoreError},
};
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span, warn};

/// Errors that end a carry-forward run.
#[derive(Debug, Error)]
pub enum CarryForwardError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The remote store client could not be constructed.
    #[error("failed to initialise remote store: {0}")]
    StoreSetup(#[source] TaskStoreError),

    /// A fetched record is malformed and nothing was written in this run.
    #[error("invalid task record: {0}")]
    Validation(#[from] TaskDomainError),

    /// A store call failed permanently or exhausted its retries. Raised for
    /// fetches and creates only when nothing was written yet, and for the
    /// closing log append.
    #[error("remote store unavailable during {operation}: {source}")]
    RemoteUnavailable {
        /// Store operation that failed.
        operation: StoreOperation,
        /// Last error reported by the store.
        #[source]
        source: TaskStoreError,
    },

    /// Some carried tasks were written before the run failed. Written
    /// tasks are not rolled back.
    #[error("carry-forward stopped after writing {written} task(s): {source}")]
    PartialWrite {
        /// Number of tasks created before the failure.
        written: usize,
        /// Failure that stopped the run.
        #[source]
        source: Box<CarryForwardError>,
    },

    /// The run date has no previous day.
    #[error("no previous day exists for {0}")]
    DateOutOfRange(NaiveDate),
}

impl CarryForwardError {
    /// Process exit code reported for this error: 2 when the run could not
    /// start, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) | Self::StoreSetup(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for carry-forward runs.
pub type CarryForwardResult<T> = Result<T, CarryForwardError>;

/// Carry-forward orchestration service.
#[derive(Clone)]
pub struct CarryForwardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    owners: Vec<OwnerId>,
    retry: RetryPolicy,
    summary_template: Option<String>,
    dry_run: bool,
}

impl<S, C> CarryForwardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service for the given owners with the default retry policy.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, owners: Vec<OwnerId>) -> Self {
        Self {
            store,
            clock,
            owners,
            retry: RetryPolicy::default(),
            summary_template: None,
            dry_run: false,
        }
    }

    /// Creates a service configured from `config`.
    #[must_use]
    pub fn from_config(store: Arc<S>, clock: Arc<C>, config: &AppConfig) -> Self {
        Self::new(store, clock, config.owners.clone())
            .with_retry(config.retry)
            .with_summary_template(config.log_template.clone())
    }

    /// Sets the retry policy for store calls.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Overrides the success summary template.
    #[must_use]
    pub fn with_summary_template(mut self, template: Option<String>) -> Self {
        self.summary_template = template;
        self
    }

    /// Enables or disables dry runs, which read and reconcile but never
    /// write.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Carries yesterday's incomplete tasks into today, as read from the
    /// clock's local date.
    ///
    /// # Errors
    ///
    /// See [`Self::run_for`].
    pub async fn run(&self) -> CarryForwardResult<LogEntry> {
        let today = self.clock.local().date_naive();
        self.run_for(today).await
    }

    /// Carries incomplete tasks from the day before `today` into `today`.
    ///
    /// Returns the log entry describing the run. On failure a log entry with
    /// [`crate::task::domain::RunStatus::Failure`] is written when the store
    /// accepts it, and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CarryForwardError`] when a record is malformed or the store
    /// stays unavailable. Once any draft has been written, every later
    /// failure is reported as [`CarryForwardError::PartialWrite`].
    pub async fn run_for(&self, today: NaiveDate) -> CarryForwardResult<LogEntry> {
        let run_id = RunId::new();
        let span = info_span!("carry_forward", %run_id, run_date = %today, dry_run = self.dry_run);
        self.execute(run_id, today).instrument(span).await
    }

    async fn execute(&self, run_id: RunId, today: NaiveDate) -> CarryForwardResult<LogEntry> {
        let mut counts = OwnerCounts::new();
        let mut written = 0;
        let carried = match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) => {
                self.carry_all(yesterday, today, &mut counts, &mut written)
                    .await
            }
            None => Err(CarryForwardError::DateOutOfRange(today)),
        };
        let outcome = carried.map_err(|err| {
            if written == 0 {
                err
            } else {
                CarryForwardError::PartialWrite {
                    written,
                    source: Box::new(err),
                }
            }
        });

        match outcome {
            Ok(()) => {
                let message = self.summary(today, &counts);
                let entry = LogEntry::success(run_id, today, counts, Some(message));
                self.write_log(&entry)
                    .await
                    .map_err(|source| CarryForwardError::RemoteUnavailable {
                        operation: StoreOperation::AppendLog,
                        source,
                    })?;
                info!(carried = entry.carried_count(), "carry-forward complete");
                Ok(entry)
            }
            Err(err) => {
                error!(error = %err, "carry-forward failed");
                let entry = LogEntry::failure(run_id, today, counts, err.to_string());
                if let Err(log_err) = self.write_log(&entry).await {
                    warn!(error = %log_err, "failure log entry could not be written");
                }
                Err(err)
            }
        }
    }

    async fn carry_all(
        &self,
        yesterday: NaiveDate,
        today: NaiveDate,
        counts: &mut OwnerCounts,
        written: &mut usize,
    ) -> CarryForwardResult<()> {
        let store = &*self.store;
        for owner in &self.owners {
            let raw = self
                .retry
                .run(StoreOperation::FetchTasks, move || {
                    store.fetch_tasks(owner, yesterday)
                })
                .await
                .map_err(|source| CarryForwardError::RemoteUnavailable {
                    operation: StoreOperation::FetchTasks,
                    source,
                })?;
            let fetched = raw.len();
            let drafts = reconcile_raw(raw, today)?;
            info!(%owner, fetched, carrying = drafts.len(), "reconciled owner tasks");

            let count = counts.entry(owner.clone()).or_default();
            for draft in &drafts {
                if !self.dry_run {
                    self.retry
                        .run(StoreOperation::CreateTask, move || store.create_task(draft))
                        .await
                        .map_err(|source| CarryForwardError::RemoteUnavailable {
                            operation: StoreOperation::CreateTask,
                            source,
                        })?;
                    *written += 1;
                }
                *count += 1;
            }
        }
        Ok(())
    }

    async fn write_log(&self, entry: &LogEntry) -> Result<(), TaskStoreError> {
        if self.dry_run {
            return Ok(());
        }
        let store = &*self.store;
        self.retry
            .run(StoreOperation::AppendLog, move || store.append_log(entry))
            .await
    }

    fn summary(&self, today: NaiveDate, counts: &OwnerCounts) -> String {
        let template = self
            .summary_template
            .as_deref()
            .unwrap_or(DEFAULT_SUMMARY_TEMPLATE);
        render_summary(template, today, counts).unwrap_or_else(|err| {
            warn!(error = %err, "summary template failed, using default");
            render_summary(DEFAULT_SUMMARY_TEMPLATE, today, counts)
                .unwrap_or_else(|_| format!("Carried tasks into {today}"))
        })
    }
}
