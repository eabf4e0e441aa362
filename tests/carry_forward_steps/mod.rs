//! Step definitions for carry-forward behaviour scenarios.

mod given;
mod then;
mod when;
pub mod world;
