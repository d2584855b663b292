//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::{Router, routing::get};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::{AuthMiddlewareState, SqliteApiKeyRepository, admin_router, require_api_key};
use coupons::{SqliteCouponRepository, coupon_router};
use platform::metrics::Metrics;
use platform::rate_limit::RateLimiter;

mod config;
mod handlers;
mod middleware;

use config::Settings;
use handlers::HealthState;
use middleware::{RateLimitState, RequestContextState, enforce_rate_limit, request_context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,coupons=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(env = %settings.env, "starting gateway");

    // Key store: created on first run, schema is idempotent
    let auth_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&settings.api_keys_db_path)
                .create_if_missing(true),
        )
        .await?;

    let auth_repo = Arc::new(SqliteApiKeyRepository::new(auth_pool.clone()));
    auth_repo.ensure_schema(settings.seed_dev_key).await?;
    tracing::info!("API key store ready");

    // Coupon dataset: pre-built, opened read-only and lazily so a missing
    // file surfaces through /readyz instead of blocking startup
    let coupon_pool = SqlitePoolOptions::new().max_connections(5).connect_lazy_with(
        SqliteConnectOptions::new()
            .filename(&settings.coupons_db_path)
            .read_only(true),
    );
    let coupon_repo = Arc::new(SqliteCouponRepository::new(coupon_pool));

    let limiter = Arc::new(RateLimiter::connect(settings.redis_url.as_deref()).await);
    tracing::info!(backend = limiter.backend().as_str(), "rate limiter ready");

    let metrics = Arc::new(Metrics::new());

    // Guard states
    let auth_state = AuthMiddlewareState {
        repo: auth_repo.clone(),
        metrics: metrics.clone(),
    };
    let rate_state = RateLimitState {
        limiter: limiter.clone(),
        metrics: metrics.clone(),
        period_secs: settings.rate_period_secs,
    };
    let ctx_state = RequestContextState {
        metrics: metrics.clone(),
    };
    let health_state = HealthState {
        auth_pool,
        coupon_repo: coupon_repo.clone(),
        limiter,
        metrics,
        hide_details: settings.is_prod(),
    };

    // Protected routes: authenticated first, then rate limited
    let protected = coupon_router(coupon_repo)
        .route_layer(from_fn_with_state(rate_state, enforce_rate_limit))
        .route_layer(from_fn_with_state(
            auth_state,
            require_api_key::<SqliteApiKeyRepository>,
        ));

    // Build router
    let app = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route("/metrics", get(handlers::metrics_snapshot))
        .with_state(health_state)
        .merge(protected)
        .nest(
            "/admin",
            admin_router(auth_repo, settings.admin_api_key.clone()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(ctx_state, request_context));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
