//! Coupon HTTP Handlers
//!
//! Read-only lookup endpoints. Both routes sit behind the API key and
//! rate-limit guards installed by the application.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use std::sync::Arc;

use kernel::envelope::Envelope;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::RequestId;

use crate::application::CouponQueriesUseCase;
use crate::domain::repository::CouponRepository;
use crate::presentation::dto::{CouponItem, ListQuery, LookupQuery, PageMeta};

/// Shared state for coupon handlers
#[derive(Clone)]
pub struct CouponAppState<R>
where
    R: CouponRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /coupon?drug_name=
pub async fn read_coupon<R>(
    State(state): State<CouponAppState<R>>,
    Extension(rid): Extension<RequestId>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<Envelope>>
where
    R: CouponRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = CouponQueriesUseCase::new(state.repo.clone());

    let coupon = use_case
        .lookup(&query.drug_name)
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?;

    Ok(Json(Envelope::ok(
        rid,
        serde_json::json!(CouponItem::from_coupon(&coupon)),
    )))
}

/// GET /coupons?page=&per_page=&drug_name=
pub async fn list_coupons<R>(
    State(state): State<CouponAppState<R>>,
    Extension(rid): Extension<RequestId>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Envelope>>
where
    R: CouponRepository + Clone + Send + Sync + 'static,
{
    let rid = rid.to_string();
    let use_case = CouponQueriesUseCase::new(state.repo.clone());

    let page = use_case
        .page(query.page, query.per_page, query.drug_name.as_deref())
        .await
        .map_err(|e| AppError::from(e).with_request_id(rid.clone()))?;

    let items: Vec<CouponItem> = page.items.iter().map(CouponItem::from_coupon).collect();
    let meta = PageMeta {
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        drug_name: query.drug_name,
    };

    Ok(Json(Envelope::ok(
        rid,
        serde_json::json!({ "items": items, "meta": meta }),
    )))
}
