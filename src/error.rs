//! Error types for the job handler.

use std::time::Duration;

/// Marker prefixed to every fatal failure raised by the `error` entrypoint.
pub const FATAL_PREFIX: &str = "Unable to recover from error: ";

/// Top-level error type returned by the lifecycle entrypoints.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// An upstream job failure that this handler declares unrecoverable.
    #[error("Unable to recover from error: {message}")]
    Fatal { message: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Unknown entrypoint: {0}")]
    UnknownEntrypoint(String),

    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HandlerError {
    /// Wrap an upstream failure message as a fatal error.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    /// Returns true for the fatal, no-local-recovery signal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }
}

/// Errors raised by a pluggable action while performing its effect.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Invalid options for {action}: {reason}")]
    InvalidOptions { action: String, reason: String },

    #[error("{action} failed on {target}: {reason}")]
    ExecutionFailed {
        action: String,
        target: String,
        reason: String,
    },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_message_carries_prefix_and_original() {
        let err = HandlerError::fatal("timeout");
        assert_eq!(err.to_string(), "Unable to recover from error: timeout");
        assert!(err.to_string().starts_with(FATAL_PREFIX));
        assert!(err.is_fatal());
    }

    #[test]
    fn action_errors_are_not_fatal() {
        let err: HandlerError = ActionError::NotAuthorized("restart".into()).into();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Action error: Not authorized: restart");
    }
}
