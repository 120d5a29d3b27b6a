//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{
    ChangeKeyRequest, LoginRequest, RsvpRequest, UnlockRequest, UpdateResourceRequest,
    UserStatusRequest,
};
pub use response::{ApiResponse, HealthResponse, MessageResponse, RsvpListResponse};
