//! Account services: login and administration.

pub mod admin;
pub mod auth;

pub use admin::{CreateUserRequest, UserAdminService};
pub use auth::{AuthService, LoginResult};
