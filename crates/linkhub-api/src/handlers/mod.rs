//! Route handlers organized by audience.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod links;
pub mod panel;
pub mod public;
pub mod resource;
pub mod users;
