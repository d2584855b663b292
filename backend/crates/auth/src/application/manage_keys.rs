//! Manage Keys Use Case
//!
//! Admin-side key lifecycle: list, create, revoke, activate, rotate.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::ApiKeyRecord;
use crate::domain::repository::ApiKeyRepository;
use crate::domain::value_object::ApiKey;
use crate::error::{AuthError, AuthResult};

/// Manage Keys Use Case
pub struct ManageKeysUseCase<R>
where
    R: ApiKeyRepository,
{
    repo: Arc<R>,
}

impl<R> ManageKeysUseCase<R>
where
    R: ApiKeyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All key records; presentation masks the key strings
    pub async fn list(&self) -> AuthResult<Vec<ApiKeyRecord>> {
        self.repo.list().await
    }

    /// Mint and store a new key. The returned record carries the full key;
    /// this is the only time it is handed out.
    pub async fn create(&self, client_name: String, rate_limit: u32) -> AuthResult<ApiKeyRecord> {
        let key = ApiKey::mint();
        let record = ApiKeyRecord {
            api_key: key.expose().to_string(),
            client_name,
            created_at: Utc::now(),
            rate_limit,
            active: true,
            last_used_at: None,
        };
        self.repo.insert(&record).await?;
        Ok(record)
    }

    /// Permanently remove a key
    pub async fn revoke(&self, api_key: &str) -> AuthResult<()> {
        if !self.repo.delete(api_key).await? {
            return Err(AuthError::KeyNotFound);
        }
        Ok(())
    }

    /// Reversibly enable or disable a key
    pub async fn set_active(&self, api_key: &str, active: bool) -> AuthResult<()> {
        if !self.repo.set_active(api_key, active).await? {
            return Err(AuthError::KeyNotFound);
        }
        Ok(())
    }

    /// Replace the key string, keeping client metadata. Returns the new
    /// full key; the caller must store it.
    pub async fn rotate(&self, api_key: &str) -> AuthResult<String> {
        let new_key = ApiKey::mint();
        if !self.repo.replace_key(api_key, new_key.expose()).await? {
            return Err(AuthError::KeyNotFound);
        }
        Ok(new_key.expose().to_string())
    }
}
