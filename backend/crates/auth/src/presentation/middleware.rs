//! Auth Middleware
//!
//! `require_api_key` guards caller endpoints; `require_admin` guards the
//! key-management surface. Neither logs header values or key material.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::id::RequestId;
use platform::metrics::Metrics;

use crate::application::VerifyApiKeyUseCase;
use crate::domain::repository::ApiKeyRepository;
use crate::error::AuthError;

/// Header carrying the caller credential
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the admin shared secret
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Authenticated caller, stored in request extensions for downstream
/// layers (the rate-limit admission point reads `rate_limit` from here)
#[derive(Debug, Clone)]
pub struct AuthedClient {
    pub api_key: String,
    pub client_name: String,
    pub rate_limit: u32,
}

/// Middleware state for `require_api_key`
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub metrics: Arc<Metrics>,
}

/// Middleware that requires a valid, active API key
pub async fn require_api_key<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let rid = request_id(&req);

    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned);

    let Some(presented) = presented else {
        state.metrics.inc_auth_failed();
        return Err(AppError::from(AuthError::MissingApiKey)
            .with_request_id(rid)
            .into_response());
    };

    let use_case = VerifyApiKeyUseCase::new(state.repo.clone());
    let record = match use_case.verify(&presented).await {
        Ok(record) => record,
        Err(e) => {
            if matches!(e, AuthError::InvalidApiKey | AuthError::KeyInactive) {
                state.metrics.inc_auth_failed();
            }
            return Err(AppError::from(e).with_request_id(rid).into_response());
        }
    };

    req.extensions_mut().insert(AuthedClient {
        api_key: record.api_key,
        client_name: record.client_name,
        rate_limit: record.rate_limit,
    });

    Ok(next.run(req).await)
}

/// Middleware state for `require_admin`
#[derive(Clone)]
pub struct AdminMiddlewareState {
    /// Unset means the admin surface is disabled (503)
    pub admin_api_key: Option<String>,
}

/// Middleware that requires the admin shared secret
pub async fn require_admin(
    State(state): State<AdminMiddlewareState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let rid = request_id(&req);

    let Some(expected) = state.admin_api_key.as_deref() else {
        return Err(AppError::from(AuthError::AdminNotConfigured)
            .with_request_id(rid)
            .into_response());
    };

    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented != Some(expected) {
        return Err(AppError::from(AuthError::AdminForbidden)
            .with_request_id(rid)
            .into_response());
    }

    Ok(next.run(req).await)
}

fn request_id(req: &Request<Body>) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.to_string())
        .unwrap_or_else(|| "-".to_string())
}
