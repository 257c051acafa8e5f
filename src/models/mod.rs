//! Data models for the Biblioteca database

pub mod activity;
pub mod book;
pub mod enums;
pub mod genre;
pub mod loan;
pub mod review;
pub mod shelf;
pub mod user;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on requested page sizes
pub const MAX_PAGE_SIZE: i64 = 100;
