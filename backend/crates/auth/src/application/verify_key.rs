//! Verify API Key Use Case

use std::sync::Arc;

use crate::domain::entity::ApiKeyRecord;
use crate::domain::repository::ApiKeyRepository;
use crate::error::{AuthError, AuthResult};

/// Verify API Key Use Case
pub struct VerifyApiKeyUseCase<R>
where
    R: ApiKeyRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyApiKeyUseCase<R>
where
    R: ApiKeyRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Verify a presented key and return its record.
    ///
    /// Last-used tracking is best-effort: a failed timestamp update never
    /// fails the request.
    pub async fn verify(&self, api_key: &str) -> AuthResult<ApiKeyRecord> {
        let record = self
            .repo
            .find(api_key)
            .await?
            .ok_or(AuthError::InvalidApiKey)?;

        if !record.active {
            return Err(AuthError::KeyInactive);
        }

        if let Err(e) = self.repo.touch_last_used(api_key).await {
            tracing::debug!(error = %e, "failed to update last-used timestamp");
        }

        Ok(record)
    }
}
