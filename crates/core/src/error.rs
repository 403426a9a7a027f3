//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    /// The value that was rejected, as it appeared in the candidate.
    pub attempted_value: serde_json::Value,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        attempted_value: serde_json::Value,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            attempted_value,
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain-level error.
///
/// Both variants are per-request outcomes; neither is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// One or more field rules failed. Always non-empty.
    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// No entity exists with the requested identifier.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation(violations)
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Field violations carried by a validation failure (empty otherwise).
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            DomainError::Validation(v) => v,
            DomainError::NotFound => &[],
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
