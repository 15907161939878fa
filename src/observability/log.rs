//! Tracing-based observer that emits structured log events.
//!
//! Events appear alongside normal application logs. The rendered progress
//! line is the log message; the event kind is attached as a field.

use crate::observability::traits::{JobEvent, JobMetric, Observer};

/// Observer that logs events and metrics via `tracing`.
pub struct LogObserver;

impl Observer for LogObserver {
    fn record_event(&self, event: &JobEvent) {
        let kind = event.kind();
        if event.is_error() {
            tracing::error!(kind, "{}", event);
        } else {
            tracing::info!(kind, "{}", event);
        }
    }

    fn record_metric(&self, metric: &JobMetric) {
        match metric {
            JobMetric::ActionDuration { action, duration } => {
                tracing::debug!(
                    action = action.as_str(),
                    duration_ms = duration.as_millis() as u64,
                    "observer: metric.action_duration"
                );
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::observability::log::LogObserver;
    use crate::observability::traits::*;

    #[test]
    fn name_is_log() {
        assert_eq!(LogObserver.name(), "log");
    }

    #[test]
    fn record_event_does_not_panic() {
        let obs = LogObserver;
        obs.record_event(&JobEvent::InvokeStarted);
        obs.record_event(&JobEvent::JobErrored {
            target: "server-1".into(),
            message: "timeout".into(),
        });
    }

    #[test]
    fn record_metric_does_not_panic() {
        LogObserver.record_metric(&JobMetric::ActionDuration {
            action: "restart".into(),
            duration: Duration::from_millis(20),
        });
    }
}
