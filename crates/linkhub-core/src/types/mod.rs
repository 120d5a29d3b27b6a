//! Core type definitions used across the LinkHub workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::{ListQuery, PageRequest, PageResponse};
