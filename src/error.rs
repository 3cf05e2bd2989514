//! Structured error types for scoring runs.

use thiserror::Error;

/// Errors that abort a scoring run.
///
/// Missing optional fields are not errors; they degrade to documented
/// neutral defaults inside the factor calculators. Dependency cycles are
/// advisory output, never an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Two records in the same batch share an id.
    #[error("duplicate task id in batch: {id}")]
    DuplicateId { id: String },

    /// A record at the given position has no id under any accepted alias.
    #[error("task at index {index} is missing an id")]
    MissingId { index: usize },

    /// A field is present but structurally malformed (e.g. unparseable date).
    #[error("task {id}: invalid {field}: {reason}")]
    InvalidField {
        id: String,
        field: &'static str,
        reason: String,
    },

    /// The caller named a strategy that does not exist. No silent fallback.
    #[error(
        "unknown strategy: {0} (expected smart_balance, fastest_wins, high_impact, or deadline_driven)"
    )]
    UnknownStrategy(String),
}

impl EngineError {
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    pub fn invalid_field(
        id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            id: id.into(),
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
