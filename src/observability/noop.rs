use crate::observability::traits::{JobEvent, JobMetric, Observer};

/// Observer that discards everything.
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn record_event(&self, _event: &JobEvent) {}

    fn record_metric(&self, _metric: &JobMetric) {}

    fn name(&self) -> &str {
        "noop"
    }
}
