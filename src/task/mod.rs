//! Daily task carry-forward.
//!
//! Reads the previous day's tasks for every tracked owner, carries the
//! incomplete ones into today and records one log entry per run. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Reconciliation and orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
