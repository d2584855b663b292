//! Coupon Lookup Module
//!
//! Read-only access to the manufacturer coupon dataset.
//!
//! Clean Architecture structure:
//! - `domain/` - Coupon entity, repository trait
//! - `application/` - Lookup and listing use cases
//! - `infra/` - SQLite repository implementation (read-only pool)
//! - `presentation/` - HTTP handlers and DTOs
//!
//! Responses expose only the coupon id and its extracted offer text;
//! the rest of the dataset columns stay internal.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entity::Coupon;
pub use error::{CouponError, CouponResult};
pub use infra::sqlite::SqliteCouponRepository;
pub use presentation::router::coupon_router;
