//! API Key Auth Module
//!
//! Clean Architecture structure:
//! - `domain/` - API key entity, value objects, repository trait
//! - `application/` - Use cases (verification, key management)
//! - `infra/` - SQLite repository implementation
//! - `presentation/` - HTTP middleware, admin handlers, DTOs
//!
//! ## Security Model
//! - Callers authenticate with an opaque key in the `x-api-key` header
//! - Admin endpoints require a separate `x-admin-key` shared secret
//! - Full key material appears only in create/rotate responses;
//!   listings and logs always see the masked form

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entity::ApiKeyRecord;
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::SqliteApiKeyRepository;
pub use presentation::middleware::{
    AdminMiddlewareState, AuthMiddlewareState, AuthedClient, require_admin, require_api_key,
};
pub use presentation::router::admin_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
