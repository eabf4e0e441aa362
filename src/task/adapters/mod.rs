//! Adapter implementations for the task store port.

pub mod memory;
pub mod notion;
