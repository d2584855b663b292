//! Auth Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;
