//! Auth Infrastructure Layer

pub mod sqlite;
