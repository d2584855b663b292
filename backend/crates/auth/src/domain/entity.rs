//! Auth Entities

use chrono::{DateTime, Utc};

/// API key record as stored in the keys database
///
/// `rate_limit` is the per-period request budget the limiter enforces for
/// this caller; changing it takes effect on the caller's next request.
#[derive(Debug, Clone)]
pub struct ApiKeyRecord {
    pub api_key: String,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
    pub rate_limit: u32,
    pub active: bool,
    pub last_used_at: Option<DateTime<Utc>>,
}
