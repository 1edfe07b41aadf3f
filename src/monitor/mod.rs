pub mod metrics;

use std::sync::atomic::{AtomicU64, Ordering};

pub use metrics::MetricsSnapshot;

/// 服务运行期间的计数
#[derive(Debug, Default)]
pub struct ServerMetrics {
    request_counter: AtomicU64,
    error_counter: AtomicU64,
    reset_counter: AtomicU64,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, success: bool) {
        self.request_counter.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.error_counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_reset(&self) {
        self.reset_counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.request_counter.load(Ordering::Relaxed),
            errors: self.error_counter.load(Ordering::Relaxed),
            counter_resets: self.reset_counter.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_metrics() {
        let metrics = ServerMetrics::new();
        metrics.record_request(true);
        metrics.record_request(false);
        metrics.record_request(true);
        metrics.record_reset();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 3);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.counter_resets, 1);
    }
}
