//! Application services for the daily carry-forward.

mod carry_forward;
mod reconcile;
mod retry;
mod summary;

pub use carry_forward::{CarryForwardError, CarryForwardResult, CarryForwardService};
pub use reconcile::{ingest, reconcile, reconcile_raw};
pub use retry::RetryPolicy;
pub use summary::{DEFAULT_SUMMARY_TEMPLATE, render_summary};
