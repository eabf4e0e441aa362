//! Carryover: daily carry-forward of incomplete tasks.
//!
//! Once a day the previous day's task list of every tracked owner is read
//! from a hosted workspace database, incomplete tasks are copied into
//! today's list, and a log entry describing the run is appended.
//!
//! # Architecture
//!
//! Carryover follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP API, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Records, reconciliation and run orchestration
//! - [`config`]: Process configuration loaded once at start-up
//! - [`telemetry`]: Logging set-up

pub mod config;
pub mod task;
pub mod telemetry;
