//! Limiter Facade
//!
//! Selects the bucket-store backend once at startup and exposes the single
//! `allow` entry point the admission layer uses. Callers never choose a
//! backend, and construction never fails: rate limiting is a protective
//! feature, not a correctness-critical one, so every failure path resolves
//! to a usable limiter.

use super::bucket::Decision;
use super::memory::InMemoryBucketStore;
use super::redis::RedisBucketStore;
use super::{BucketStore, RateLimitError};

/// Which store backs the limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitBackend {
    InProcess,
    Redis,
}

impl RateLimitBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitBackend::InProcess => "in_process",
            RateLimitBackend::Redis => "redis",
        }
    }
}

/// Rate limiter with startup backend selection and per-call fallback
///
/// The in-process store is always constructed, so degrading on a remote
/// failure needs no allocation or setup on the error path.
pub struct RateLimiter {
    remote: Option<RedisBucketStore>,
    local: InMemoryBucketStore,
}

impl RateLimiter {
    /// Build a limiter for the configured backend.
    ///
    /// `None` selects the in-process store. With a URL, remote store
    /// construction is attempted once; any error is logged and the limiter
    /// silently runs in-process for the lifetime of the process - the
    /// service must still start.
    pub async fn connect(redis_url: Option<&str>) -> Self {
        let remote = match redis_url {
            Some(url) => match RedisBucketStore::connect(url).await {
                Ok(store) => {
                    tracing::info!("rate limiter using redis backend");
                    Some(store)
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "redis unavailable, rate limiting falls back to in-process store"
                    );
                    None
                }
            },
            None => None,
        };

        Self {
            remote,
            local: InMemoryBucketStore::new(),
        }
    }

    /// Limiter that never touches a remote store
    pub fn in_process() -> Self {
        Self {
            remote: None,
            local: InMemoryBucketStore::new(),
        }
    }

    /// The backend selected at construction
    pub fn backend(&self) -> RateLimitBackend {
        if self.remote.is_some() {
            RateLimitBackend::Redis
        } else {
            RateLimitBackend::InProcess
        }
    }

    /// Admission check for `key` with its configured `limit` and the global
    /// refill `period`.
    ///
    /// A transient remote failure is logged and the check resolves via the
    /// in-process store for that call; it never crashes or blocks the
    /// request path. The only error callers can observe is
    /// [`RateLimitError::InvalidPeriod`].
    pub async fn allow(
        &self,
        key: &str,
        limit: u32,
        period_secs: u64,
    ) -> Result<Decision, RateLimitError> {
        if let Some(remote) = &self.remote {
            match remote.allow(key, limit, period_secs).await {
                Ok(decision) => return Ok(decision),
                Err(RateLimitError::InvalidPeriod) => {
                    return Err(RateLimitError::InvalidPeriod);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "remote rate limit check failed, using in-process fallback"
                    );
                }
            }
        }
        self.local.allow(key, limit, period_secs).await
    }
}
