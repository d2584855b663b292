//! Rate Limiting Infrastructure
//!
//! Per-key token buckets behind interchangeable storage backends:
//! an in-process map for single-instance deployments and a Redis-backed
//! store for consistent enforcement across instances. The [`RateLimiter`]
//! facade picks the backend once at startup and is the only entry point
//! the admission layer uses.

pub mod bucket;
pub mod limiter;
pub mod memory;
pub mod redis;

pub use bucket::{Bucket, Decision};
pub use limiter::{RateLimitBackend, RateLimiter};
pub use memory::InMemoryBucketStore;
pub use redis::RedisBucketStore;

use thiserror::Error;

/// Errors raised by bucket stores
#[derive(Debug, Error)]
pub enum RateLimitError {
    /// `period` is a divisor in the refill computation; zero is a caller
    /// bug the configuration layer is expected to reject.
    #[error("rate limit period must be at least one second")]
    InvalidPeriod,

    /// Remote store failure. The facade never surfaces this to callers;
    /// it resolves the check via the in-process fallback instead.
    #[error("remote store error: {0}")]
    Remote(#[from] ::redis::RedisError),
}

/// Trait for rate limit storage backends
///
/// Implementations own their bucket state and synchronization; callers
/// only ever see a [`Decision`]. Safe for arbitrarily many concurrent
/// callers, including concurrent calls for the same key.
#[trait_variant::make(BucketStore: Send)]
pub trait LocalBucketStore {
    /// Run one admission check for `key` with the given capacity and
    /// refill period.
    async fn allow(
        &self,
        key: &str,
        limit: u32,
        period_secs: u64,
    ) -> Result<Decision, RateLimitError>;
}
