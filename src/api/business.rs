//! Business API handlers

use crate::api::{PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{CreateBusinessInput, StringUuid, UpdateBusinessInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Register a business owned by the caller
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBusinessInput>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let business = state.business_service.create(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(business))))
}

/// List businesses (system admin only)
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let (businesses, total) = state
        .business_service
        .list(&actor, pagination.offset(), pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        businesses,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get business by ID
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let business = state.business_service.get(&actor, id).await?;
    Ok(Json(SuccessResponse::new(business)))
}

/// Update business
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateBusinessInput>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let business = state.business_service.update(&actor, id, input).await?;
    Ok(Json(SuccessResponse::new(business)))
}

/// Delete business
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    state.business_service.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
