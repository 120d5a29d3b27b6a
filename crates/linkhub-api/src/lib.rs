//! # linkhub-api
//!
//! HTTP API layer for LinkHub built on Axum.
//!
//! Serves public key dispatch (`GET /{key}`), the owner panel and the
//! system-admin dashboard under `/api`, together with the middleware,
//! extractors, DTOs and error mapping they share.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
