//! # linkhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all LinkHub entities.
//!
//! Repository methods never hold a pool. Each takes the connection to run
//! on as an explicit `&mut PgConnection`, which may be a pooled connection
//! or an open transaction owned by the caller.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
