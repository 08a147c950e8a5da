//! errors.rs - Custom error types for the redactx-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `redactx-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RedactxError {
    /// A row of an imported rule file is malformed. `row` is the 1-based line number.
    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("No rules found in the imported file.")]
    EmptyImport,

    #[error("A rule with the pattern '{0}' already exists.")]
    DuplicateFind(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Failed to compile pattern '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("No rule with id '{0}'.")]
    RuleNotFound(String),

    #[error("Failed to (de)serialize stored data: {0}")]
    SerializationError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

impl RedactxError {
    pub(crate) fn row(row: usize, reason: impl Into<String>) -> Self {
        RedactxError::InvalidRow { row, reason: reason.into() }
    }
}

impl From<serde_json::Error> for RedactxError {
    fn from(e: serde_json::Error) -> Self {
        RedactxError::SerializationError(e.to_string())
    }
}
