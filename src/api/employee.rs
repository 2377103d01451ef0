//! Employee API handlers

use crate::api::{PaginationQuery, SuccessResponse};
use crate::domain::{StringUuid, UpdateEmployeeInput};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Direct employee creation. Always rejected with 405: employees are
/// created by accepting an invitation.
pub async fn create(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    state.employee_service.create_direct(&actor)?;
    Ok(StatusCode::METHOD_NOT_ALLOWED)
}

/// List the employees of a business visible to the caller
pub async fn list_by_business(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(business_id): Path<StringUuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let employees = state
        .employee_service
        .list(&actor, business_id, pagination.offset(), pagination.per_page)
        .await?;
    Ok(Json(SuccessResponse::new(employees)))
}

/// Get employee by ID
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let employee = state.employee_service.get(&actor, id).await?;
    Ok(Json(SuccessResponse::new(employee)))
}

/// Update employee
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateEmployeeInput>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    let employee = state.employee_service.update(&actor, id, input).await?;
    Ok(Json(SuccessResponse::new(employee)))
}

/// Delete employee
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let actor = state.auth_service.resolve_actor(auth.user_id).await?;
    state.employee_service.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
