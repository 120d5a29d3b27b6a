//! Owner panel: each user manages their own resources.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use validator::Validate;

use linkhub_core::types::{InvitationId, PageResponse};
use linkhub_service::{OwnerSummary, ResourceDraft};

use crate::dto::{
    ApiResponse, MessageResponse, RsvpListResponse, UpdateResourceRequest,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ListParams, PaginationParams};
use crate::handlers::resource::ResourceRoutes;
use crate::state::AppState;

/// GET /api/panel/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<OwnerSummary>>> {
    let summary = state.summary.for_owner(&auth).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/panel/{kind}
pub async fn list<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<R::Record>>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let page = R::service(&state)
        .list_for_owner(&auth, &params.into_list_query())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/panel/{kind}
pub async fn create<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<ResourceDraft<R::Detail>>,
) -> ApiResult<(StatusCode, Json<ApiResponse<R::Record>>)>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let record = R::service(&state).create(&auth, draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// GET /api/panel/{kind}/{id}
pub async fn get<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<R::Record>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let record = R::service(&state).get_by_id(&auth, id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/panel/{kind}/{id}
pub async fn update<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateResourceRequest<R::Detail>>,
) -> ApiResult<Json<ApiResponse<R::Record>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    let record = R::service(&state)
        .update(&auth, id, req.into_update())
        .await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// DELETE /api/panel/{kind}/{id}
pub async fn delete<R>(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>>
where
    R: ResourceRoutes,
    R::Detail: Validate + DeserializeOwned,
{
    R::service(&state).delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted"))))
}

/// GET /api/panel/invitations/{id}/rsvps
pub async fn rsvps(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<RsvpListResponse>>> {
    let invitation_id = InvitationId(id);
    let tally = state.rsvps.tally(&auth, invitation_id).await?;
    let rsvps = state
        .rsvps
        .list(&auth, invitation_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(RsvpListResponse { tally, rsvps })))
}
