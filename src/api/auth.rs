//! Authentication API handlers

use crate::api::SuccessResponse;
use crate::domain::LoginInput;
use crate::error::Result;
use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};

/// Log in with email or phone plus password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let tokens = state.auth_service.login(input).await?;
    Ok(Json(SuccessResponse::new(tokens)))
}
