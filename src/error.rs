//! Crate error types

use thiserror::Error;

/// Errors raised during policy/run construction and orchestration.
#[derive(Debug, Error)]
pub enum EnsenarError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Schedule must contain at least one rung")]
    EmptySchedule,

    #[error("Policy '{0}' requested confirmation but no confirmation environment is attached")]
    MissingConfirmEnv(String),
}

/// Result type for curriculum operations
pub type Result<T> = std::result::Result<T, EnsenarError>;

impl EnsenarError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}
