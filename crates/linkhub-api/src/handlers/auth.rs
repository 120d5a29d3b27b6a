//! Authentication handlers.

use axum::Json;
use axum::extract::State;

use linkhub_entity::user::User;
use linkhub_entity::validation::validate;
use linkhub_service::LoginResult;

use crate::dto::{ApiResponse, LoginRequest};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResult>>> {
    validate(&req)?;
    let result = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.auth.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}
