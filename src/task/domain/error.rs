//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The owner identifier is empty after trimming.
    #[error("owner identifier must not be empty")]
    EmptyOwnerId,

    /// The remote source identifier is empty after trimming.
    #[error("source identifier must not be empty")]
    EmptySourceId,

    /// A required field was absent from a fetched record.
    #[error("task record {source_id} is missing required field '{field}'")]
    MissingField {
        /// Remote identifier of the malformed record.
        source_id: String,
        /// Name of the absent field.
        field: &'static str,
    },
}

/// Error returned while parsing run statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown run status: {0}")]
pub struct ParseRunStatusError(pub String);
