//! Authentication HTTP handlers

use crate::{
    error::AppError,
    middleware::AppState,
    models::auth::{LoginPayload, TokenResponse},
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Token endpoint (`GET /user/get_token`).
///
/// Accepts a flat string map: `{username, password}` for password login, or a
/// signed Telegram widget payload (which auto-provisions an account on first
/// login). Any failure is a uniform 401.
pub async fn get_token(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<LoginPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.ok_or(AppError::Unauthorized)?;

    let user = state.auth_service.login(&payload).await?;
    let token = state.auth_service.issue_session_token(&user)?;

    Ok(Json(TokenResponse { token }))
}
