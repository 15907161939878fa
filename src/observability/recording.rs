//! Observer that captures all events into a shared vector.
//!
//! Lets tests and embedders assert on the progress trail of an entrypoint
//! without touching the global log output.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::observability::traits::{JobEvent, JobMetric, Observer};

/// Shared buffer of captured events.
pub type EventLog = Arc<Mutex<Vec<JobEvent>>>;

/// Shared buffer of captured metrics.
pub type MetricLog = Arc<Mutex<Vec<JobMetric>>>;

/// Observer that records all events for later inspection.
pub struct RecordingObserver {
    events: EventLog,
    metrics: MetricLog,
    flush_count: Arc<AtomicU32>,
}

impl RecordingObserver {
    /// Create a new recording observer and return handles to the captured data.
    pub fn new() -> (Self, EventLog, MetricLog) {
        let (obs, events, metrics, _) = Self::with_flush_counter();
        (obs, events, metrics)
    }

    /// Create a new recording observer with a shared flush counter.
    pub fn with_flush_counter() -> (Self, EventLog, MetricLog, Arc<AtomicU32>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let metrics = Arc::new(Mutex::new(Vec::new()));
        let flush_count = Arc::new(AtomicU32::new(0));
        (
            Self {
                events: Arc::clone(&events),
                metrics: Arc::clone(&metrics),
                flush_count: Arc::clone(&flush_count),
            },
            events,
            metrics,
            flush_count,
        )
    }
}

impl Observer for RecordingObserver {
    fn record_event(&self, event: &JobEvent) {
        // A poisoned lock only means another recorder panicked mid-push.
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(event.clone());
    }

    fn record_metric(&self, metric: &JobMetric) {
        let mut metrics = self.metrics.lock().unwrap_or_else(|e| e.into_inner());
        metrics.push(metric.clone());
    }

    fn flush(&self) {
        self.flush_count.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Render captured events as their progress lines.
pub fn rendered_lines(events: &EventLog) -> Vec<String> {
    events
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .map(ToString::to_string)
        .collect()
}
