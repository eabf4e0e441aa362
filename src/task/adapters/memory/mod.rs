//! In-memory adapters for tests and local dry runs.

mod store;

pub use store::{Fault, InMemoryTaskStore};
