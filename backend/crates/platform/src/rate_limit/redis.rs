//! Remote Bucket Store (Redis)
//!
//! Bucket state lives in Redis so every gateway instance enforces the same
//! limit. The entire read-refill-decide-write sequence executes as a single
//! Lua script: Redis runs scripts single-threaded, which linearizes
//! concurrent checks for the same key across all instances. A client-side
//! get/compute/set sequence would race and is deliberately not used.
//!
//! Bucket keys are written with `EX period*2`, so abandoned buckets expire
//! without a separate sweep.

use std::time::Duration;

use ::redis::Script;
use ::redis::aio::{ConnectionManager, ConnectionManagerConfig};

use super::bucket::Decision;
use super::memory::now_secs;
use super::{BucketStore, RateLimitError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Runs the bucket algorithm server-side and returns `{allowed, remaining}`.
///
/// The stored limit is persisted alongside the bucket; when it differs from
/// the requested limit the bucket resets fully refilled, matching the
/// in-process store's behavior on plan changes.
const TOKEN_BUCKET_LUA: &str = r#"
local key_tokens = KEYS[1]
local key_last = KEYS[2]
local key_limit = KEYS[3]
local limit = tonumber(ARGV[1])
local period = tonumber(ARGV[2])
local now = tonumber(ARGV[3])
local ttl = period * 2

local stored_limit = tonumber(redis.call("GET", key_limit) or -1)
local tokens
local last
if stored_limit ~= limit then
  tokens = limit
  last = now
else
  tokens = tonumber(redis.call("GET", key_tokens) or limit)
  last = tonumber(redis.call("GET", key_last) or now)
  local elapsed = now - last
  local refill = math.floor(elapsed / period) * limit
  if refill > 0 then
    tokens = math.min(limit, tokens + refill)
    last = now
  end
end

local allowed = 0
if tokens > 0 then
  tokens = tokens - 1
  allowed = 1
end

redis.call("SET", key_tokens, tokens, "EX", ttl)
redis.call("SET", key_last, last, "EX", ttl)
redis.call("SET", key_limit, limit, "EX", ttl)
if allowed == 1 then
  return {1, tokens}
end
return {0, 0}
"#;

/// Redis-backed bucket store
///
/// The connection manager is built once and reused across all calls; it
/// reconnects internally on transient failures. Timeouts are bounded so a
/// slow Redis cannot stall request admission.
#[derive(Clone)]
pub struct RedisBucketStore {
    conn: ConnectionManager,
    script: Script,
}

impl RedisBucketStore {
    /// Connect to Redis and hold a multiplexed connection.
    ///
    /// Fails fast when the URL is malformed or the server is unreachable,
    /// so the facade can fall back to the in-process store at startup.
    pub async fn connect(url: &str) -> Result<Self, RateLimitError> {
        let client = ::redis::Client::open(url)?;
        let config = ConnectionManagerConfig::new()
            .set_connection_timeout(CONNECT_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT)
            .set_number_of_retries(1);
        let conn = ConnectionManager::new_with_config(client, config).await?;
        Ok(Self {
            conn,
            script: Script::new(TOKEN_BUCKET_LUA),
        })
    }
}

impl BucketStore for RedisBucketStore {
    async fn allow(
        &self,
        key: &str,
        limit: u32,
        period_secs: u64,
    ) -> Result<Decision, RateLimitError> {
        if period_secs == 0 {
            return Err(RateLimitError::InvalidPeriod);
        }

        let mut conn = self.conn.clone();
        let (allowed, remaining): (i64, i64) = self
            .script
            .key(format!("rl:{key}:tokens"))
            .key(format!("rl:{key}:last"))
            .key(format!("rl:{key}:limit"))
            .arg(limit)
            .arg(period_secs)
            .arg(now_secs())
            .invoke_async(&mut conn)
            .await?;

        Ok(Decision {
            allowed: allowed == 1,
            remaining: remaining.max(0) as u32,
        })
    }
}
