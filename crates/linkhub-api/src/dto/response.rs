//! Response DTOs.

use serde::Serialize;

use linkhub_core::types::PageResponse;
use linkhub_entity::resource::rsvp::InvitationRsvp;
use linkhub_service::RsvpTally;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true`; failures use `ApiErrorResponse`.
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// RSVPs for one invitation plus the per-status counts.
#[derive(Debug, Clone, Serialize)]
pub struct RsvpListResponse {
    pub tally: Vec<RsvpTally>,
    pub rsvps: PageResponse<InvitationRsvp>,
}
