//! Auth DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::ApiKeyRecord;
use crate::domain::value_object::mask_key;

fn default_rate_limit() -> u32 {
    60
}

/// POST /admin/keys request body
#[derive(Debug, Deserialize)]
pub struct CreateKeyRequest {
    pub client_name: String,
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,
}

/// POST /admin/keys/{key}/activate request body
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// Key record as shown in listings - key string always masked
#[derive(Debug, Serialize)]
pub struct KeySummary {
    pub api_key: String,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
    pub rate_limit: u32,
    pub active: bool,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl KeySummary {
    pub fn masked_from(record: &ApiKeyRecord) -> Self {
        Self {
            api_key: mask_key(&record.api_key),
            client_name: record.client_name.clone(),
            created_at: record.created_at,
            rate_limit: record.rate_limit,
            active: record.active,
            last_used_at: record.last_used_at,
        }
    }
}

/// Create response - the only place the full key appears besides rotate
#[derive(Debug, Serialize)]
pub struct CreatedKey {
    pub api_key: String,
    pub client_name: String,
    pub rate_limit: u32,
}

/// Rotate response carrying the replacement key
#[derive(Debug, Serialize)]
pub struct RotatedKey {
    pub api_key: String,
}
