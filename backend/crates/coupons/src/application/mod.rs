//! Coupon Application Layer - Use Cases

pub mod lookup;

pub use lookup::CouponQueriesUseCase;
