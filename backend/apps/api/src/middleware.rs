//! Request Middleware
//!
//! Two app-level layers: the request context layer (outermost; request id,
//! response header, counters, one log line per request) and the rate-limit
//! admission layer that guards the protected routes after authentication.
//!
//! Neither layer logs headers, query strings, or key material.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use auth::AuthedClient;
use kernel::envelope::Envelope;
use kernel::error::kind::ErrorKind;
use kernel::id::RequestId;
use platform::metrics::Metrics;
use platform::rate_limit::RateLimiter;

/// Response header echoing the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// State for the request context layer
#[derive(Clone)]
pub struct RequestContextState {
    pub metrics: Arc<Metrics>,
}

/// Outermost layer: assigns a request ID, counts the request, echoes
/// `x-request-id`, and emits one structured log line per request.
pub async fn request_context(
    State(state): State<RequestContextState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    state.metrics.inc_requests();

    let rid = RequestId::new();
    req.extensions_mut().insert(rid);

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        state.metrics.inc_errors();
    }

    if let Ok(value) = HeaderValue::from_str(&rid.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    tracing::info!(
        request_id = %rid,
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}

/// State for the rate-limit admission layer
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
    pub metrics: Arc<Metrics>,
    /// Global refill period shared by every key
    pub period_secs: u64,
}

/// Admission check for authenticated routes.
///
/// Runs inside `require_api_key`, so the caller identity is already in
/// request extensions. A denial becomes a 429 envelope; an internal
/// limiter error admits the request, protection must never take the
/// service down with it.
pub async fn enforce_rate_limit(
    State(state): State<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(client) = req.extensions().get::<AuthedClient>().cloned() else {
        // Only reachable if this layer is mounted without the auth guard.
        tracing::error!("rate limit layer reached without an authenticated caller");
        return Ok(next.run(req).await);
    };

    match state
        .limiter
        .allow(&client.api_key, client.rate_limit, state.period_secs)
        .await
    {
        Ok(decision) if !decision.allowed => {
            state.metrics.inc_rate_limited();
            let rid = req
                .extensions()
                .get::<RequestId>()
                .map(|rid| rid.to_string())
                .unwrap_or_else(|| "-".to_string());
            let envelope = Envelope::fail(
                rid,
                ErrorKind::TooManyRequests,
                "Rate limit exceeded",
                None,
            );
            Err((StatusCode::TOO_MANY_REQUESTS, Json(envelope)).into_response())
        }
        Ok(_) => Ok(next.run(req).await),
        Err(e) => {
            tracing::error!(error = %e, "rate limit check failed, admitting request");
            Ok(next.run(req).await)
        }
    }
}
