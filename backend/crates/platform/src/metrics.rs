//! Process Metrics
//!
//! Lightweight request counters exposed by the `/metrics` endpoint.
//! Counters are incremented by the admission layer, never by the rate
//! limiter itself.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Shared counter set for one process
#[derive(Debug, Default)]
pub struct Metrics {
    requests_total: AtomicU64,
    errors_total: AtomicU64,
    rate_limited_total: AtomicU64,
    auth_failed_total: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_errors(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rate_limited(&self) {
        self.rate_limited_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_auth_failed(&self) {
        self.auth_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Consistent-enough point-in-time view of the counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            errors_total: self.errors_total.load(Ordering::Relaxed),
            rate_limited_total: self.rate_limited_total.load(Ordering::Relaxed),
            auth_failed_total: self.auth_failed_total.load(Ordering::Relaxed),
        }
    }
}

/// Serializable counter snapshot
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub errors_total: u64,
    pub rate_limited_total: u64,
    pub auth_failed_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = Metrics::new();
        let snap = metrics.snapshot();
        assert_eq!(snap.requests_total, 0);
        assert_eq!(snap.errors_total, 0);
        assert_eq!(snap.rate_limited_total, 0);
        assert_eq!(snap.auth_failed_total, 0);
    }

    #[test]
    fn test_increment_and_snapshot() {
        let metrics = Metrics::new();
        metrics.inc_requests();
        metrics.inc_requests();
        metrics.inc_rate_limited();
        metrics.inc_auth_failed();

        let snap = metrics.snapshot();
        assert_eq!(snap.requests_total, 2);
        assert_eq!(snap.errors_total, 0);
        assert_eq!(snap.rate_limited_total, 1);
        assert_eq!(snap.auth_failed_total, 1);
    }
}
