//! Link key issuance and resolution.
//!
//! - `generator`: random keys over the 62-character alphabet
//! - `issuer`: generate, check and insert with a bounded number of attempts
//! - `resolver`: map an inbound key to its live link
//! - `registry`: link kind to `link_types.id` lookup, loaded at startup
//! - `service`: link-level operations outside issuance

pub mod generator;
pub mod issuer;
pub mod registry;
pub mod resolver;
pub mod service;

#[cfg(test)]
pub(crate) mod memory;

pub use generator::{KeyGenerator, SecureKeyGenerator};
pub use issuer::LinkIssuer;
pub use registry::LinkTypeRegistry;
pub use resolver::LinkResolver;
pub use service::LinkService;
