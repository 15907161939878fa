//! Fan-out observer that forwards to several backends.

use crate::observability::traits::{JobEvent, JobMetric, Observer};

/// Forwards every event and metric to each wrapped observer, in order.
pub struct MultiObserver {
    observers: Vec<Box<dyn Observer>>,
}

impl MultiObserver {
    pub fn new(observers: Vec<Box<dyn Observer>>) -> Self {
        Self { observers }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Observer for MultiObserver {
    fn record_event(&self, event: &JobEvent) {
        for observer in &self.observers {
            observer.record_event(event);
        }
    }

    fn record_metric(&self, metric: &JobMetric) {
        for observer in &self.observers {
            observer.record_metric(metric);
        }
    }

    fn flush(&self) {
        for observer in &self.observers {
            observer.flush();
        }
    }

    fn name(&self) -> &str {
        "multi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{LogObserver, RecordingObserver};

    #[test]
    fn forwards_to_every_backend() {
        let (first, first_events, _) = RecordingObserver::new();
        let (second, second_events, _) = RecordingObserver::new();
        let multi = MultiObserver::new(vec![
            Box::new(first),
            Box::new(LogObserver),
            Box::new(second),
        ]);

        multi.record_event(&JobEvent::DryRun);

        assert_eq!(multi.len(), 3);
        assert_eq!(first_events.lock().unwrap().len(), 1);
        assert_eq!(second_events.lock().unwrap().len(), 1);
    }

    #[test]
    fn flush_reaches_every_backend() {
        let (obs, _, _, flushes) = RecordingObserver::with_flush_counter();
        let multi = MultiObserver::new(vec![Box::new(obs)]);
        multi.flush();
        assert_eq!(flushes.load(std::sync::atomic::Ordering::Relaxed), 1);
    }
}
