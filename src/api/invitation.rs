//! Invitation API handlers

use crate::api::{PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{AcceptInvitationInput, CreateInvitationInput, StringUuid};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Issue an employee invitation
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateInvitationInput>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let invitation = state.invitation_service.create(&actor, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(invitation))))
}

/// Redeem an invitation token (no authentication: the token is the
/// credential)
pub async fn accept(
    State(state): State<AppState>,
    Json(input): Json<AcceptInvitationInput>,
) -> Result<impl IntoResponse> {
    let employee = state.invitation_service.accept(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(employee))))
}

/// Get invitation by ID
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let invitation = state.invitation_service.get(&actor, id).await?;
    Ok(Json(SuccessResponse::new(invitation)))
}

/// List a business's invitations
pub async fn list_by_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<StringUuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let (invitations, total) = state
        .invitation_service
        .list(&actor, business_id, pagination.offset(), pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        invitations,
        pagination.page,
        pagination.per_page,
        total,
    )))
}
