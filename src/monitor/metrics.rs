use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub errors: u64,
    pub counter_resets: u64,
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests={} errors={} counter_resets={}",
            self.requests, self.errors, self.counter_resets
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_display() {
        let snapshot = MetricsSnapshot {
            requests: 12,
            errors: 1,
            counter_resets: 2,
        };
        assert_eq!(snapshot.to_string(), "requests=12 errors=1 counter_resets=2");
    }
}
