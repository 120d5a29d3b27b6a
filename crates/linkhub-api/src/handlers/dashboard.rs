//! System-admin dashboard: every user's resources.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::de::DeserializeOwned;
use validator::Validate;

use linkhub_core::types::PageResponse;
use linkhub_service::PlatformSummary;

use crate::dto::{ApiResponse, MessageResponse, UpdateResourceRequest};
use crate::error::ApiResult;
use crate::extractors::{ListParams, SystemAdmin};
use crate::handlers::resource::ResourceRoutes;
use crate::state::AppState;

/// GET /api/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    admin: SystemAdmin,
) -> ApiResult<Json<ApiResponse<PlatformSummary>>> {
    let summary = state.summary.platform(&admin).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/dashboard/{kind}
pub async fn list<R>(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<R::Record>>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let page = R::service(&state)
        .list_all(&admin, &params.into_list_query())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/dashboard/{kind}/{id}
pub async fn get<R>(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<R::Record>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let record = R::service(&state).get_by_id(&admin, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/dashboard/{kind}/{id}
pub async fn update<R>(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UpdateResourceRequest<R::Detail>>,
) -> ApiResult<Json<ApiResponse<R::Record>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let record = R::service(&state)
        .update(&admin, id, req.into_update())
        .await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// DELETE /api/dashboard/{kind}/{id}
pub async fn delete<R>(
    State(state): State<AppState>,
    admin: SystemAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    R::service(&state).delete(&admin, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}
