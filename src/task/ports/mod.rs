//! Port contracts for the carry-forward.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod store;

pub use store::{StoreOperation, TaskStore, TaskStoreError, TaskStoreResult};
