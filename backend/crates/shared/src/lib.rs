//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of gateway vocabulary:
//! - Common error types and result aliases
//! - The uniform JSON response envelope
//! - Common primitive value objects (request IDs)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod envelope;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
