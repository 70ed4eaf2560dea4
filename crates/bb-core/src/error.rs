//! # AppError
//!
//! Centralized error handling for the bounty-board ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all bb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Bounty, User)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., negative reward, unknown category)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Missing or invalid bearer token
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down)
    #[error("internal service error: {0}")]
    Internal(String),

    /// Resource already exists (e.g., duplicate user email)
    #[error("conflict: {0}")]
    Conflict(String),
}

/// A specialized Result type for bounty-board logic.
pub type Result<T> = std::result::Result<T, AppError>;
