//! Task tree HTTP handlers

use crate::{
    auth::middleware::CurrentUser,
    error::AppError,
    middleware::AppState,
    models::task::{CreateTaskRequest, UpdateTaskRequest},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// List the user's tasks (`GET /tasks`)
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let tasks = state.task_service.list_tasks(user.id).await?;
    Ok(Json(tasks))
}

/// Create a new root task (`POST /tasks`)
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("Title required.".to_string()))?;

    let task = state.task_service.create_task(user.id, &req, None).await?;
    Ok(Json(task))
}

/// One task (`GET /task/{id}`)
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let task = state.task_service.get_task(user.id, task_id).await?;
    Ok(Json(task))
}

/// Create a subtask of an existing task (`POST /task/{id}`)
pub async fn create_subtask(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("Title required.".to_string()))?;

    let task = state
        .task_service
        .create_task(user.id, &req, Some(task_id))
        .await?;
    Ok(Json(task))
}

/// Replace all fields of a task (`PUT /task/{id}`)
pub async fn replace_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("Title required.".to_string()))?;

    let task = state
        .task_service
        .replace_task(user.id, task_id, &req)
        .await?;
    Ok(Json(task))
}

/// Update supplied fields of a task (`PATCH /task/{id}`)
pub async fn patch_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|_| AppError::BadRequest("Title required.".to_string()))?;

    let task = state
        .task_service
        .patch_task(user.id, task_id, &req)
        .await?;
    Ok(Json(task))
}

/// Delete a task and its subtasks (`DELETE /task/{id}`)
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let task = state.task_service.delete_task(user.id, task_id).await?;
    Ok(Json(task))
}
