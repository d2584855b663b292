//! Coupon Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::CouponRepository;
use crate::presentation::handlers::{self, CouponAppState};

/// Coupon lookup routes.
///
/// Auth and rate limiting are applied by the application when these
/// routes are mounted.
pub fn coupon_router<R>(repo: Arc<R>) -> Router
where
    R: CouponRepository + Clone + Send + Sync + 'static,
{
    let state = CouponAppState { repo };

    Router::new()
        .route("/coupon", get(handlers::read_coupon::<R>))
        .route("/coupons", get(handlers::list_coupons::<R>))
        .with_state(state)
}
