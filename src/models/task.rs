//! Task domain models
//! Tasks form a per-user tree: each task may reference a parent task and owns
//! any number of subtasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Task row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Task for which this task is a subtask; None for root tasks
    pub parent_id: Option<i64>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Create/replace request (PUT requires the full field set)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 64, message = "Title required."))]
    pub title: String,
    pub description: Option<String>,
}

/// Partial update request (PATCH touches only supplied fields)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 64, message = "Title required."))]
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Task response with the ids of its direct subtasks
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub subtask_ids: Vec<i64>,
}

impl TaskResponse {
    pub fn from_task(task: Task, subtask_ids: Vec<i64>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            parent_id: task.parent_id,
            subtask_ids,
        }
    }
}
