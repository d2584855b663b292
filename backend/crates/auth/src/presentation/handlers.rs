//! Admin HTTP Handlers
//!
//! Key-management CRUD. Listings mask key material; only the create and
//! rotate responses return a full key, and the caller must store it.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

use kernel::envelope::Envelope;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::RequestId;

use crate::application::ManageKeysUseCase;
use crate::domain::repository::ApiKeyRepository;
use crate::presentation::dto::{
    CreateKeyRequest, CreatedKey, KeySummary, RotatedKey, SetActiveRequest,
};

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminAppState<R>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /admin/keys
pub async fn list_keys<R>(
    State(state): State<AdminAppState<R>>,
    Extension(rid): Extension<RequestId>,
) -> AppResult<Json<Envelope>>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = ManageKeysUseCase::new(state.repo.clone());

    let keys: Vec<KeySummary> = use_case
        .list()
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?
        .iter()
        .map(KeySummary::masked_from)
        .collect();

    Ok(Json(Envelope::ok(rid, serde_json::json!({ "keys": keys }))))
}

/// POST /admin/keys
pub async fn create_key<R>(
    State(state): State<AdminAppState<R>>,
    Extension(rid): Extension<RequestId>,
    Json(req): Json<CreateKeyRequest>,
) -> AppResult<Json<Envelope>>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = ManageKeysUseCase::new(state.repo.clone());

    let record = use_case
        .create(req.client_name, req.rate_limit)
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?;

    let created = CreatedKey {
        api_key: record.api_key,
        client_name: record.client_name,
        rate_limit: record.rate_limit,
    };

    Ok(Json(Envelope::ok_with(
        rid,
        serde_json::json!(created),
        "Key created",
        201,
    )))
}

/// POST /admin/keys/{api_key}/revoke
pub async fn revoke_key<R>(
    State(state): State<AdminAppState<R>>,
    Extension(rid): Extension<RequestId>,
    Path(api_key): Path<String>,
) -> AppResult<Json<Envelope>>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = ManageKeysUseCase::new(state.repo.clone());

    use_case
        .revoke(&api_key)
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?;

    Ok(Json(Envelope::ok(rid, serde_json::json!({ "revoked": true }))))
}

/// POST /admin/keys/{api_key}/activate
pub async fn activate_key<R>(
    State(state): State<AdminAppState<R>>,
    Extension(rid): Extension<RequestId>,
    Path(api_key): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> AppResult<Json<Envelope>>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = ManageKeysUseCase::new(state.repo.clone());

    use_case
        .set_active(&api_key, req.active)
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?;

    Ok(Json(Envelope::ok(
        rid,
        serde_json::json!({ "active": req.active }),
    )))
}

/// POST /admin/keys/{api_key}/rotate
pub async fn rotate_key<R>(
    State(state): State<AdminAppState<R>>,
    Extension(rid): Extension<RequestId>,
    Path(api_key): Path<String>,
) -> AppResult<Json<Envelope>>
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = ManageKeysUseCase::new(state.repo.clone());

    let new_key = use_case
        .rotate(&api_key)
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?;

    Ok(Json(Envelope::ok_with(
        rid,
        serde_json::json!(RotatedKey { api_key: new_key }),
        "Key rotated",
        200,
    )))
}
