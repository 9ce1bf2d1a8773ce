//! # AppError
//!
//! Centralized error handling for the Rusty-Feedback ecosystem.
//! Every failure here is local and recoverable; none of them leaves a store
//! half-written.

use thiserror::Error;

/// The primary error type for all rf-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or out-of-range input (e.g., comment too short, 6 stars)
    #[error("validation error: {0}")]
    Validation(String),

    /// Signup with an email that already has an account
    #[error("an account with email {0} already exists")]
    DuplicateEmail(String),

    /// Login mismatch. Deliberately does not say which half was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Claim attempted below the reward threshold
    #[error("insufficient points: {available} available, {required} required")]
    InsufficientPoints { available: u64, required: u64 },

    /// Resource not found (e.g., Account, Restaurant)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Infrastructure failure (e.g., DB down, poisoned lock, hashing failure)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound(kind.to_string(), id.to_string())
    }

    /// Wraps any backend error as `Internal`.
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A specialized Result type for Rusty-Feedback logic.
pub type Result<T> = std::result::Result<T, AppError>;
