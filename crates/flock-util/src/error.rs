//! Error types for flock

use thiserror::Error;

/// Core error type for flock operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlockError {
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Unknown pen: {0:?}")]
    UnknownPen(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FlockError {
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate(value.into())
    }

    pub fn unknown_pen(value: impl Into<String>) -> Self {
        Self::UnknownPen(value.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FlockError>;
