//! Custom Axum extractors.

pub mod auth;
pub mod pagination;

pub use auth::{AuthUser, SystemAdmin};
pub use pagination::{ListParams, PaginationParams};
