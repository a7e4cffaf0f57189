//! Error types for workflow domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing workflow domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GtdDomainError {
    /// A required text field is empty after trimming.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A text field exceeds its storage limit.
    #[error("{field} exceeds {max} character limit")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum number of characters accepted.
        max: usize,
    },

    /// The email address is not shaped `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A numeric field is below its minimum.
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Name of the offending field.
        field: &'static str,
        /// Smallest accepted value.
        min: i32,
        /// Rejected value.
        value: i32,
    },

    /// The energy level is outside `1..=5`.
    #[error("energy must be between 1 and 5, got {0}")]
    EnergyOutOfRange(i32),

    /// A task was asked to depend on itself.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),
}

/// Error returned while parsing project or task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} status: {value}")]
pub struct ParseStatusError {
    /// Which status family was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseStatusError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
