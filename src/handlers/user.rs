//! User HTTP handlers

use crate::{
    auth::middleware::CurrentUser,
    error::AppError,
    middleware::AppState,
    models::auth::TokenResponse,
    models::user::{RegisterRequest, UserResponse},
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

/// Current user (`GET /user`)
pub async fn get_current_user(
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserResponse::from(user)))
}

/// Register a new account (`POST /user`); answers with a session token
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("Username and password required.".to_string()))?;

    let (_user, token) = state
        .auth_service
        .register(&req.username, &req.password, req.photo.as_deref())
        .await?;

    Ok(Json(TokenResponse { token }))
}
