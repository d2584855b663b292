//! Repository Traits
//!
//! Interfaces for API key persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::ApiKeyRecord;
use crate::error::AuthResult;

/// API key repository trait
#[trait_variant::make(ApiKeyRepository: Send)]
pub trait LocalApiKeyRepository {
    /// Look up a key record by its full key string
    async fn find(&self, api_key: &str) -> AuthResult<Option<ApiKeyRecord>>;

    /// Record that a key was just used (best-effort bookkeeping)
    async fn touch_last_used(&self, api_key: &str) -> AuthResult<()>;

    /// All key records, newest first
    async fn list(&self) -> AuthResult<Vec<ApiKeyRecord>>;

    /// Store a freshly minted key record
    async fn insert(&self, record: &ApiKeyRecord) -> AuthResult<()>;

    /// Toggle the active flag; returns false when the key does not exist
    async fn set_active(&self, api_key: &str, active: bool) -> AuthResult<bool>;

    /// Permanently remove a key; returns false when the key does not exist
    async fn delete(&self, api_key: &str) -> AuthResult<bool>;

    /// Swap the key string, keeping client metadata; returns false when
    /// the old key does not exist
    async fn replace_key(&self, api_key: &str, new_key: &str) -> AuthResult<bool>;
}
