//! Coupon Infrastructure Layer

pub mod sqlite;
