//! Observability subsystem: the injected sink for lifecycle diagnostics.
//!
//! Provides a pluggable [`Observer`] trait with multiple backends:
//!
//! | Backend     | Description |
//! |-------------|-------------|
//! | `noop`      | Discards everything |
//! | `log`       | Emits structured events via `tracing` (default) |
//! | `multi`     | Fan-out to multiple backends simultaneously |
//! | `recording` | Captures events in memory for assertions |
//!
//! The [`create_observer`] factory builds the configured backend from
//! [`ObservabilityConfig`].

mod log;
mod multi;
mod noop;
pub mod recording;
pub mod traits;

pub use self::log::LogObserver;
pub use self::multi::MultiObserver;
pub use self::noop::NoopObserver;
pub use self::recording::RecordingObserver;
pub use self::traits::{JobEvent, JobMetric, Observer};

/// Configuration for the observability backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Backend name: "none", "noop" or "log".
    pub backend: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: "log".into(),
        }
    }
}

/// Create an observer from configuration.
///
/// Returns a [`LogObserver`] for "log" and a [`NoopObserver`] for
/// "none"/"noop". Unknown names fall back to noop with a warning.
pub fn create_observer(config: &ObservabilityConfig) -> Box<dyn Observer> {
    match config.backend.as_str() {
        "log" => Box::new(LogObserver),
        "none" | "noop" => Box::new(NoopObserver),
        other => {
            tracing::warn!("Unknown observer backend '{}', falling back to noop", other);
            Box::new(NoopObserver)
        }
    }
}
