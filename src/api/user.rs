//! User API handlers

use crate::api::{MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse};
use crate::domain::{
    ChangePasswordInput, CreateUserInput, RequestPasswordResetInput, ResetPasswordInput,
    StringUuid, UpdateUserInput,
};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Register a new user (no authentication required)
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.register(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(user))))
}

/// List users (system admin only)
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let (users, total) = state
        .user_service
        .list(&actor, pagination.offset(), pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        users,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Get user by ID
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let user = state.user_service.get(&actor, id).await?;
    Ok(Json(SuccessResponse::new(user)))
}

/// Update user
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateUserInput>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let user = state.user_service.update(&actor, id, input).await?;
    Ok(Json(SuccessResponse::new(user)))
}

/// Change the caller's own password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordInput>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    state.user_service.change_password(&actor, input).await?;
    Ok(Json(MessageResponse::new("Password changed")))
}

/// Request a password reset link (no authentication required)
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<RequestPasswordResetInput>,
) -> Result<impl IntoResponse> {
    state.password_reset_service.request_reset(input).await?;
    Ok(Json(MessageResponse::new("Password reset link sent")))
}

/// Redeem a reset token and set a new password (the token is the credential)
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordInput>,
) -> Result<impl IntoResponse> {
    state.password_reset_service.confirm_reset(input).await?;
    Ok(Json(MessageResponse::new("Password has been reset")))
}

/// Delete user
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    state.user_service.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
