//! Pure domain logic for the document versioning and integrity system.
//!
//! This crate has no internal dependencies so it can be used by the
//! storage, database, and service layers alike.

pub mod activity;
pub mod error;
pub mod hashing;
pub mod lifecycle;
pub mod roles;
pub mod types;
