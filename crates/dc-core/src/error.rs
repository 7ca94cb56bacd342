//! # AppError
//!
//! Centralized error handling for the disaster-console ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all dc-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., a document id missing from its collection)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., required form field missing)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// An upstream feed could not be fetched or parsed
    #[error("upstream feed error: {0}")]
    Upstream(String),

    /// Infrastructure failure (e.g., document store rejected a write)
    #[error("internal service error: {0}")]
    Internal(String),

    /// Resource already exists
    #[error("conflict: {0}")]
    Conflict(String),
}

/// A specialized Result type for disaster-console logic.
pub type Result<T> = std::result::Result<T, AppError>;
