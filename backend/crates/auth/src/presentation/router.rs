//! Admin Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::ApiKeyRepository;
use crate::presentation::handlers::{self, AdminAppState};
use crate::presentation::middleware::{AdminMiddlewareState, require_admin};

/// Key-management router, guarded by the `x-admin-key` header.
///
/// Mounted under `/admin` by the application. Admin calls are
/// authenticated by a shared secret and are not rate limited.
pub fn admin_router<R>(repo: Arc<R>, admin_api_key: Option<String>) -> Router
where
    R: ApiKeyRepository + Clone + Send + Sync + 'static,
{
    let state = AdminAppState { repo };
    let guard = AdminMiddlewareState { admin_api_key };

    Router::new()
        .route(
            "/keys",
            get(handlers::list_keys::<R>).post(handlers::create_key::<R>),
        )
        .route("/keys/{api_key}/revoke", post(handlers::revoke_key::<R>))
        .route(
            "/keys/{api_key}/activate",
            post(handlers::activate_key::<R>),
        )
        .route("/keys/{api_key}/rotate", post(handlers::rotate_key::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_admin))
        .with_state(state)
}
