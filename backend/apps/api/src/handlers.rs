//! Health and Metrics Handlers
//!
//! Public endpoints: liveness, readiness, and the counter snapshot.
//! None of these sit behind the key or rate-limit guards.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json, extract::State};
use sqlx::SqlitePool;

use coupons::SqliteCouponRepository;
use coupons::domain::repository::CouponRepository;
use kernel::envelope::Envelope;
use kernel::error::kind::ErrorKind;
use kernel::id::RequestId;
use platform::metrics::Metrics;
use platform::rate_limit::RateLimiter;

/// Shared state for the public endpoints
#[derive(Clone)]
pub struct HealthState {
    pub auth_pool: SqlitePool,
    pub coupon_repo: Arc<SqliteCouponRepository>,
    pub limiter: Arc<RateLimiter>,
    pub metrics: Arc<Metrics>,
    /// Prod withholds failure details from the readiness response
    pub hide_details: bool,
}

/// GET /healthz
pub async fn healthz(Extension(rid): Extension<RequestId>) -> Json<Envelope> {
    Json(Envelope::ok(
        rid.to_string(),
        serde_json::json!({ "status": "ok" }),
    ))
}

/// GET /readyz
///
/// Ready means both databases answer a basic query. The active
/// rate-limit backend is reported for operators; it never fails
/// readiness because the limiter always degrades to in-process.
pub async fn readyz(
    State(state): State<HealthState>,
    Extension(rid): Extension<RequestId>,
) -> Response {
    let rid = rid.to_string();

    let checks = async {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&state.auth_pool)
            .await?;
        state.coupon_repo.count(None).await?;
        Ok::<(), anyhow::Error>(())
    };

    if let Err(e) = checks.await {
        tracing::warn!(error = %e, "readiness check failed");
        let details = if state.hide_details {
            None
        } else {
            Some(serde_json::json!(e.to_string()))
        };
        let envelope = Envelope::fail(rid, ErrorKind::ServiceUnavailable, "Not ready", details);
        return (StatusCode::SERVICE_UNAVAILABLE, Json(envelope)).into_response();
    }

    let envelope = Envelope::ok(
        rid,
        serde_json::json!({
            "status": "ready",
            "rate_limit_backend": state.limiter.backend().as_str(),
        }),
    );
    (StatusCode::OK, Json(envelope)).into_response()
}

/// GET /metrics
pub async fn metrics_snapshot(
    State(state): State<HealthState>,
    Extension(rid): Extension<RequestId>,
) -> Json<Envelope> {
    Json(Envelope::ok(
        rid.to_string(),
        serde_json::json!(state.metrics.snapshot()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{Router, middleware, routing::get};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    use crate::middleware::{RequestContextState, request_context};

    async fn memory_pool(max: u32) -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(max)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    async fn health_app(coupon_table: bool, hide_details: bool) -> Router {
        let auth_pool = memory_pool(1).await;
        let coupon_pool = memory_pool(1).await;
        if coupon_table {
            sqlx::query("CREATE TABLE manufacturer_coupons (id INTEGER PRIMARY KEY, drug_name TEXT NOT NULL, ai_extraction TEXT)")
                .execute(&coupon_pool)
                .await
                .unwrap();
        }

        let metrics = Arc::new(Metrics::new());
        let state = HealthState {
            auth_pool,
            coupon_repo: Arc::new(SqliteCouponRepository::new(coupon_pool)),
            limiter: Arc::new(RateLimiter::in_process()),
            metrics: metrics.clone(),
            hide_details,
        };

        Router::new()
            .route("/healthz", get(healthz))
            .route("/readyz", get(readyz))
            .route("/metrics", get(metrics_snapshot))
            .with_state(state)
            .layer(middleware::from_fn_with_state(
                RequestContextState { metrics },
                request_context,
            ))
    }

    fn get_request(path: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::builder()
            .uri(path)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_healthz_is_ok() {
        let app = health_app(true, false).await;
        let response = app.oneshot(get_request("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_ready_when_tables_answer() {
        let app = health_app(true, false).await;
        let response = app.oneshot(get_request("/readyz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_503_when_coupon_table_missing() {
        let app = health_app(false, false).await;
        let response = app.oneshot(get_request("/readyz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_metrics_snapshot_responds() {
        let app = health_app(true, false).await;
        let response = app.oneshot(get_request("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
