//! Bounded fixed-delay retry for store calls.

use crate::task::ports::{StoreOperation, TaskStoreResult};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Number of attempts per remote call unless configured otherwise.
const DEFAULT_ATTEMPTS: u32 = 3;

/// Pause between attempts unless configured otherwise.
const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Retries transient store failures a fixed number of times.
///
/// Non-transient failures are returned after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. A zero attempt count is raised to one.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    /// Creates a policy that retries without pausing.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Returns the total number of attempts, first call included.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the pause between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `call` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last store error when no attempt succeeded.
    pub async fn run<T, F, Fut>(&self, operation: StoreOperation, mut call: F) -> TaskStoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TaskStoreResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        %operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "transient store failure, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, DEFAULT_DELAY)
    }
}
