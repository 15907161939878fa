//! Typed payloads for the three lifecycle entrypoints.
//!
//! Optional fields carry their defaults through `serde`, so a payload
//! deserialized from the orchestrator's JSON is always fully populated.

use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, Result};

/// Target substituted when a halt request does not name one.
pub const UNKNOWN_TARGET: &str = "unknown";

/// Payload for `invoke`.
///
/// | Field     | Required | Default |
/// |-----------|----------|---------|
/// | `target`  | yes      |         |
/// | `action`  | yes      |         |
/// | `options` | no       | `[]`    |
/// | `dry_run` | no       | `false` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokePayload {
    pub target: String,
    pub action: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl InvokePayload {
    /// Create a payload with default options and a real (non-dry) run.
    pub fn new(target: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            action: action.into(),
            options: Vec::new(),
            dry_run: false,
        }
    }

    /// Set the ordered options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the run as a dry run.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Check that `target` and `action` are non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(HandlerError::InvalidPayload(
                "'target' must be a non-empty string".to_string(),
            ));
        }
        if self.action.is_empty() {
            return Err(HandlerError::InvalidPayload(
                "'action' must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

/// Upstream failure reported to the `error` entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFailure {
    pub message: String,
    /// Any further fields the orchestrator attached. Preserved, never read.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Payload for `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: JobFailure,
    pub target: String,
}

impl ErrorPayload {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: JobFailure {
                message: message.into(),
                details: serde_json::Map::new(),
            },
            target: target.into(),
        }
    }
}

/// Payload for `halt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaltPayload {
    pub reason: String,
    #[serde(default)]
    pub target: Option<String>,
}

impl HaltPayload {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// The named target, or [`UNKNOWN_TARGET`].
    pub fn target_or_unknown(&self) -> &str {
        self.target.as_deref().unwrap_or(UNKNOWN_TARGET)
    }
}
