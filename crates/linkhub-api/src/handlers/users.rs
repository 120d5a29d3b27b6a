//! Account administration (system admin only).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use linkhub_core::types::{PageResponse, UserId};
use linkhub_entity::user::User;
use linkhub_service::CreateUserRequest;

use crate::dto::{ApiResponse, UserStatusRequest};
use crate::error::ApiResult;
use crate::extractors::{ListParams, SystemAdmin};
use crate::state::AppState;

/// GET /api/dashboard/users
pub async fn list(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<User>>>> {
    let page = state
        .users
        .list_users(&admin, &params.into_list_query())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/dashboard/users
pub async fn create(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.users.create_user(&admin, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// PUT /api/dashboard/users/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UserStatusRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state
        .users
        .set_status(&admin, UserId(id), req.status)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}
