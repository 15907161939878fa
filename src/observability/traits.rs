//! Core observer trait and event/metric types.

use std::fmt;
use std::time::Duration;

use crate::secrets::MaskedSecret;

/// Sink for job lifecycle diagnostics.
///
/// The handler records an event at each step of an entrypoint and the
/// observer decides what to do with it: log it, fan it out, keep it for
/// assertions, or drop it.
///
/// Thread-safe and cheaply cloneable behind `Arc<dyn Observer>`.
pub trait Observer: Send + Sync {
    /// Record a discrete lifecycle event.
    fn record_event(&self, event: &JobEvent);

    /// Record a numeric metric sample.
    fn record_metric(&self, metric: &JobMetric);

    /// Flush any buffered data. No-op by default.
    fn flush(&self) {}

    /// Human-readable backend name (e.g. "noop", "log").
    fn name(&self) -> &str;
}

/// Discrete events emitted by the lifecycle entrypoints.
///
/// `Display` renders the human-readable progress line for each event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    InvokeStarted,
    TargetSelected { target: String },
    ActionSelected { action: String },
    DryRun,
    Environment { profile: String },
    /// The API key in use. Only ever carries the masked form.
    ApiKeyInUse { key: MaskedSecret },
    PriorOutputsAvailable { count: usize },
    PriorOutputKeys { job_ids: Vec<String> },
    ActionStarted { action: String, target: String },
    OptionsReceived { options: Vec<String> },
    ActionCompleted { action: String, target: String },
    JobErrored { target: String, message: String },
    JobHalted { target: String, reason: String },
}

impl JobEvent {
    /// Whether the event belongs on the error channel.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::JobErrored { .. })
    }

    /// Short dotted name attached as the `kind` field of the log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvokeStarted => "invoke.start",
            Self::TargetSelected { .. } => "invoke.target",
            Self::ActionSelected { .. } => "invoke.action",
            Self::DryRun => "invoke.dry_run",
            Self::Environment { .. } => "invoke.environment",
            Self::ApiKeyInUse { .. } => "invoke.api_key",
            Self::PriorOutputsAvailable { .. } => "invoke.prior_outputs",
            Self::PriorOutputKeys { .. } => "invoke.prior_output_keys",
            Self::ActionStarted { .. } => "action.start",
            Self::OptionsReceived { .. } => "action.options",
            Self::ActionCompleted { .. } => "action.end",
            Self::JobErrored { .. } => "job.error",
            Self::JobHalted { .. } => "job.halt",
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvokeStarted => write!(f, "Starting job execution"),
            Self::TargetSelected { target } => write!(f, "Processing target: {}", target),
            Self::ActionSelected { action } => write!(f, "Action: {}", action),
            Self::DryRun => write!(f, "DRY RUN: No changes will be made"),
            Self::Environment { profile } => write!(f, "Running in {} environment", profile),
            Self::ApiKeyInUse { key } => match key {
                MaskedSecret::Suffix(_) => write!(f, "Using API key ending in {}", key),
                MaskedSecret::Hidden => write!(f, "Using API key {}", key),
            },
            Self::PriorOutputsAvailable { count } => {
                write!(f, "Available outputs from {} previous jobs", count)
            }
            Self::PriorOutputKeys { job_ids } => {
                write!(f, "Previous job outputs: {}", job_ids.join(", "))
            }
            Self::ActionStarted { action, target } => {
                write!(f, "Performing {} on {}...", action, target)
            }
            Self::OptionsReceived { options } => write!(
                f,
                "Processing {} options: {}",
                options.len(),
                options.join(", ")
            ),
            Self::ActionCompleted { action, target } => {
                write!(f, "Successfully completed {} on {}", action, target)
            }
            Self::JobErrored { target, message } => write!(
                f,
                "Job encountered error while processing {}: {}",
                target, message
            ),
            Self::JobHalted { target, reason } => write!(
                f,
                "Job is being halted ({}) while processing {}",
                reason, target
            ),
        }
    }
}

/// Numeric metric samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobMetric {
    /// Wall-clock time spent in an action's effect.
    ActionDuration { action: String, duration: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_progress_lines() {
        let cases = [
            (JobEvent::InvokeStarted, "Starting job execution"),
            (
                JobEvent::TargetSelected {
                    target: "server-1".into(),
                },
                "Processing target: server-1",
            ),
            (
                JobEvent::Environment {
                    profile: "development".into(),
                },
                "Running in development environment",
            ),
            (
                JobEvent::ApiKeyInUse {
                    key: MaskedSecret::Suffix("1234".into()),
                },
                "Using API key ending in ...1234",
            ),
            (
                JobEvent::ApiKeyInUse {
                    key: MaskedSecret::Hidden,
                },
                "Using API key [REDACTED]",
            ),
            (
                JobEvent::PriorOutputKeys {
                    job_ids: vec!["build".into(), "test".into()],
                },
                "Previous job outputs: build, test",
            ),
            (
                JobEvent::OptionsReceived {
                    options: vec!["force".into(), "quiet".into()],
                },
                "Processing 2 options: force, quiet",
            ),
            (
                JobEvent::JobHalted {
                    target: "unknown".into(),
                    reason: "user_requested".into(),
                },
                "Job is being halted (user_requested) while processing unknown",
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(event.to_string(), expected);
        }
    }

    #[test]
    fn only_job_errors_use_error_channel() {
        assert!(
            JobEvent::JobErrored {
                target: "t".into(),
                message: "m".into()
            }
            .is_error()
        );
        assert!(!JobEvent::DryRun.is_error());
    }
}
