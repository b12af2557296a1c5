//! # AppError
//!
//! Centralized error handling for the TrendWatch ecosystem.
//! Each variant is one fault category a capability may report to its caller.

use std::fmt::Display;

use thiserror::Error;

/// The primary error type for all source and store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Transient fetch failure (network error, timeout, non-2xx response)
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The remote answered but the payload could not be understood
    #[error("malformed response: {0}")]
    Parse(String),

    /// Persistence failure (backend unreachable, write rejected)
    #[error("storage error: {0}")]
    Storage(String),

    /// Caller input that cannot be coerced into something usable
    #[error("validation error: {0}")]
    Validation(String),

    /// Anything else that should never happen
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn fetch(err: impl Display) -> Self {
        Self::Fetch(err.to_string())
    }

    pub fn parse(err: impl Display) -> Self {
        Self::Parse(err.to_string())
    }

    pub fn storage(err: impl Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// True for the fault categories a source is expected to hit in normal
    /// operation and recover from by returning an empty batch.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Parse(_))
    }
}

/// A specialized Result type for TrendWatch logic.
pub type Result<T> = std::result::Result<T, AppError>;
