//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// These map to appropriate HTTP status codes and convert to `AppError`
/// for unified error handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `x-api-key` header was presented
    #[error("Missing API key")]
    MissingApiKey,

    /// The presented key matches no record
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The key exists but has been deactivated
    #[error("API key is inactive")]
    KeyInactive,

    /// Admin surface requested but no admin key is configured
    #[error("Admin API key not configured")]
    AdminNotConfigured,

    /// Admin header missing or mismatched
    #[error("Forbidden")]
    AdminForbidden,

    /// Target key for an admin operation does not exist
    #[error("Key not found")]
    KeyNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingApiKey | AuthError::InvalidApiKey | AuthError::KeyInactive => {
                ErrorKind::Unauthorized
            }
            AuthError::AdminNotConfigured => ErrorKind::ServiceUnavailable,
            AuthError::AdminForbidden => ErrorKind::Forbidden,
            AuthError::KeyNotFound => ErrorKind::NotFound,
            AuthError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "auth database error");
            }
            AuthError::AdminForbidden | AuthError::AdminNotConfigured => {
                tracing::warn!(error = %self, "admin access rejected");
            }
            _ => {
                tracing::debug!(error = %self, "auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}
