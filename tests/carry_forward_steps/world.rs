//! Shared world state for carry-forward BDD scenarios.

use carryover::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{LogEntry, OwnerId},
    services::CarryForwardResult,
};
use chrono::NaiveDate;
use rstest::fixture;

/// Date every scenario carries into.
pub const TODAY: (i32, u32, u32) = (2024, 5, 2);

/// Scenario world for carry-forward behaviour tests.
pub struct CarryForwardWorld {
    pub store: InMemoryTaskStore,
    pub owners: Vec<OwnerId>,
    pub next_record: usize,
    pub last_result: Option<CarryForwardResult<LogEntry>>,
}

impl CarryForwardWorld {
    /// Creates a world with an empty store and two tracked owners.
    #[must_use]
    pub fn new() -> Self {
        let owners = ["owner-a", "owner-b"]
            .into_iter()
            .filter_map(|owner| OwnerId::new(owner).ok())
            .collect();
        Self {
            store: InMemoryTaskStore::new(),
            owners,
            next_record: 0,
            last_result: None,
        }
    }

    /// Returns the run date used by every scenario.
    pub fn today() -> Result<NaiveDate, eyre::Report> {
        let (year, month, day) = TODAY;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| eyre::eyre!("invalid scenario date"))
    }

    /// Returns the day before the run date.
    pub fn yesterday() -> Result<NaiveDate, eyre::Report> {
        Self::today()?
            .pred_opt()
            .ok_or_else(|| eyre::eyre!("scenario date has no previous day"))
    }

    /// Returns the outcome of the last run.
    pub fn result(&self) -> Result<&CarryForwardResult<LogEntry>, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing run result in scenario world"))
    }

    /// Returns the single log entry written by the last run.
    pub fn logged_entry(&self) -> Result<LogEntry, eyre::Report> {
        let mut logs = self.store.logs();
        if logs.len() != 1 {
            return Err(eyre::eyre!("expected one log entry, found {}", logs.len()));
        }
        logs.pop()
            .ok_or_else(|| eyre::eyre!("log entry disappeared"))
    }
}

impl Default for CarryForwardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CarryForwardWorld {
    CarryForwardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
