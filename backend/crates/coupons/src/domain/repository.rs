//! Repository Traits
//!
//! Read-only interface over the coupon dataset. Implementation is in
//! the infrastructure layer.

use crate::domain::entity::Coupon;
use crate::error::CouponResult;

/// Coupon repository trait
#[trait_variant::make(CouponRepository: Send)]
pub trait LocalCouponRepository {
    /// First coupon for a drug name; exact case-insensitive match first,
    /// then a substring fallback
    async fn find_by_drug(&self, drug_name: &str) -> CouponResult<Option<Coupon>>;

    /// A page of coupons ordered by id, optionally filtered by drug name
    async fn list(
        &self,
        limit: u32,
        offset: u32,
        drug_name: Option<&str>,
    ) -> CouponResult<Vec<Coupon>>;

    /// Total rows matching the same filter as [`LocalCouponRepository::list`]
    async fn count(&self, drug_name: Option<&str>) -> CouponResult<i64>;
}
