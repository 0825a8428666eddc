use gcd_talker_lib::{CacheError, TalkerError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Lookup failed
    #[error("{0}")]
    Talker(#[from] TalkerError),

    /// Result cache error
    #[error("{0}")]
    Cache(#[from] CacheError),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Lookup returned nothing
    #[error("{0}")]
    NotFound(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Process exit code: the talker error code offset by one so that `0`
    /// stays success.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            CliError::Talker(e) => i32::from(e.code()) + 1,
            CliError::NotFound(_) => 4,
            _ => 1,
        }
    }
}
