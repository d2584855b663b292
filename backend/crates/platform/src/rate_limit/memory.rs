//! In-Process Bucket Store
//!
//! A shared map of per-key buckets behind a single coarse mutex:
//! correctness over throughput, acceptable because the critical section is
//! O(1) map access plus arithmetic with no I/O or await points inside.
//!
//! State is process-local. In a multi-instance deployment each instance
//! enforces the limit independently, so the effective aggregate limit is
//! `limit * instance_count` - the accepted tradeoff when no remote store
//! is configured.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use super::bucket::{Bucket, Decision, refill_and_take};
use super::{BucketStore, RateLimitError};

/// Process-local bucket store
#[derive(Debug, Default)]
pub struct InMemoryBucketStore {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl InMemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admission check against an explicit clock (unix seconds).
    ///
    /// The trait impl supplies wall-clock time; tests drive the clock
    /// directly so refill behavior needs no sleeping.
    pub fn allow_at(
        &self,
        key: &str,
        limit: u32,
        period_secs: u64,
        now: i64,
    ) -> Result<Decision, RateLimitError> {
        if period_secs == 0 {
            return Err(RateLimitError::InvalidPeriod);
        }

        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (bucket, decision) = refill_and_take(buckets.get(key).copied(), limit, period_secs, now);
        buckets.insert(key.to_string(), bucket);
        Ok(decision)
    }
}

impl BucketStore for InMemoryBucketStore {
    async fn allow(
        &self,
        key: &str,
        limit: u32,
        period_secs: u64,
    ) -> Result<Decision, RateLimitError> {
        self.allow_at(key, limit, period_secs, now_secs())
    }
}

/// Current unix time in whole seconds
pub(crate) fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_sequential_exhaustion() {
        let store = InMemoryBucketStore::new();
        for expected_remaining in (0..5).rev() {
            let decision = store.allow_at("k1", 5, 60, 1_000).unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }
        let decision = store.allow_at("k1", 5, 60, 1_000).unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryBucketStore::new();
        assert!(store.allow_at("a", 1, 60, 0).unwrap().allowed);
        assert!(!store.allow_at("a", 1, 60, 0).unwrap().allowed);
        // "b" still has its full allotment.
        assert!(store.allow_at("b", 1, 60, 0).unwrap().allowed);
    }

    #[test]
    fn test_refill_after_period() {
        let store = InMemoryBucketStore::new();
        for _ in 0..3 {
            store.allow_at("k", 3, 60, 100).unwrap();
        }
        assert!(!store.allow_at("k", 3, 60, 100).unwrap().allowed);
        let decision = store.allow_at("k", 3, 60, 160).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
    }

    #[test]
    fn test_limit_change_resets() {
        let store = InMemoryBucketStore::new();
        store.allow_at("k", 2, 60, 0).unwrap();
        store.allow_at("k", 2, 60, 0).unwrap();
        assert!(!store.allow_at("k", 2, 60, 0).unwrap().allowed);
        let decision = store.allow_at("k", 8, 60, 0).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 7);
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let store = InMemoryBucketStore::new();
        assert!(matches!(
            store.allow_at("k", 5, 0, 0),
            Err(RateLimitError::InvalidPeriod)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_same_key_admits_exactly_limit() {
        let store = Arc::new(InMemoryBucketStore::new());
        let limit = 10u32;
        let callers = 32usize;

        let mut handles = Vec::with_capacity(callers);
        for _ in 0..callers {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.allow("shared", limit, 60).await.unwrap()
            }));
        }

        let mut admitted = 0u32;
        for handle in handles {
            let decision = handle.await.unwrap();
            assert!(decision.remaining <= limit);
            if decision.allowed {
                admitted += 1;
            }
        }
        assert_eq!(admitted, limit);
    }
}
