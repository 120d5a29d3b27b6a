//! Unauthenticated routes addressed by link key.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use linkhub_entity::resource::rsvp::InvitationRsvp;
use linkhub_service::PublicView;

use crate::dto::{ApiResponse, RsvpRequest, UnlockRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /{key}
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<ApiResponse<PublicView>>> {
    let view = state.dispatcher.dispatch(&key, None).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /{key}/unlock
pub async fn unlock(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UnlockRequest>,
) -> ApiResult<Json<ApiResponse<PublicView>>> {
    let view = state
        .dispatcher
        .dispatch(&key, Some(req.password.as_str()))
        .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /{key}/rsvp
pub async fn rsvp(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<RsvpRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<InvitationRsvp>>)> {
    let saved = state
        .rsvps
        .submit(&key, req.password.as_deref(), req.rsvp)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(saved))))
}
