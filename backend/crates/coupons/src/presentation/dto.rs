//! Coupon DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entity::Coupon;

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

/// GET /coupon query string
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub drug_name: String,
}

/// GET /coupons query string
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    pub drug_name: Option<String>,
}

/// Coupon as shown to callers - only the id and offer text leave the service
#[derive(Debug, Serialize)]
pub struct CouponItem {
    pub id: i64,
    pub ai_extraction: Option<String>,
}

impl CouponItem {
    pub fn from_coupon(coupon: &Coupon) -> Self {
        Self {
            id: coupon.id,
            ai_extraction: coupon.ai_extraction.clone(),
        }
    }
}

/// Paging metadata echoed back with listings
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub drug_name: Option<String>,
}
