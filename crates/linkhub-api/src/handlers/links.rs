//! Link lookups for owners.

use axum::Json;
use axum::extract::{Path, State};

use linkhub_core::types::LinkId;
use linkhub_entity::link::Link;

use crate::dto::{ApiResponse, ChangeKeyRequest};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/panel/links/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Link>>> {
    let mut conn = state.db.acquire().await?;
    let link = state.links.get_by_id(&mut *conn, &auth, LinkId(id)).await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// PUT /api/panel/links/{id}/key
///
/// Keys are immutable; any different key is answered with 409.
pub async fn change_key(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<ChangeKeyRequest>,
) -> ApiResult<Json<ApiResponse<Link>>> {
    let mut conn = state.db.acquire().await?;
    let link = state
        .links
        .change_key(&mut *conn, &auth, LinkId(id), &req.key)
        .await?;
    Ok(Json(ApiResponse::ok(link)))
}
