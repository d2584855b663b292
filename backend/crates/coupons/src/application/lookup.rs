//! Coupon Query Use Cases
//!
//! Lookup by drug name and paginated listing over the read-only dataset.

use std::sync::Arc;

use crate::domain::entity::Coupon;
use crate::domain::repository::CouponRepository;
use crate::error::{CouponError, CouponResult};

/// Largest page size a caller may request
pub const MAX_PER_PAGE: u32 = 500;

/// A page of coupons with the totals needed for paging metadata
#[derive(Debug)]
pub struct CouponPage {
    pub items: Vec<Coupon>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Coupon Query Use Case
pub struct CouponQueriesUseCase<R>
where
    R: CouponRepository,
{
    repo: Arc<R>,
}

impl<R> CouponQueriesUseCase<R>
where
    R: CouponRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Best match for a drug name, or `NotFound`
    pub async fn lookup(&self, drug_name: &str) -> CouponResult<Coupon> {
        self.repo
            .find_by_drug(drug_name)
            .await?
            .ok_or(CouponError::NotFound)
    }

    /// One page of coupons. Out-of-range paging inputs are clamped
    /// rather than rejected: page floors at 1, per_page at 1..=500.
    pub async fn page(
        &self,
        page: u32,
        per_page: u32,
        drug_name: Option<&str>,
    ) -> CouponResult<CouponPage> {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let page = page.max(1);
        let offset = (page - 1).saturating_mul(per_page);

        let items = self.repo.list(per_page, offset, drug_name).await?;
        let total = self.repo.count(drug_name).await?;

        Ok(CouponPage {
            items,
            page,
            per_page,
            total,
        })
    }
}
