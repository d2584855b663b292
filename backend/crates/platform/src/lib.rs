//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Rate limiting infrastructure (token buckets over in-process or Redis storage)
//! - Process metrics counters
//! - Cryptographic utilities (secure random token generation)

pub mod crypto;
pub mod metrics;
pub mod rate_limit;
