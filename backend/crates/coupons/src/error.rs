//! Coupon Error Types
//!
//! This module provides coupon-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Coupon-specific result type alias
pub type CouponResult<T> = Result<T, CouponError>;

/// Coupon-specific error variants
#[derive(Debug, Error)]
pub enum CouponError {
    /// No coupon matches the requested drug name
    #[error("Coupon not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CouponError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CouponError::NotFound => ErrorKind::NotFound,
            CouponError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CouponError::Database(e) => {
                tracing::error!(error = %e, "coupon database error");
            }
            CouponError::NotFound => {
                tracing::debug!("coupon lookup missed");
            }
        }
    }
}

impl From<CouponError> for AppError {
    fn from(err: CouponError) -> Self {
        err.log();
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}
