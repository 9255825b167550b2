//! Task tree service
//! Owner-scoped CRUD over the parent/child task hierarchy

use crate::{
    error::AppError,
    models::task::{CreateTaskRequest, TaskResponse, UpdateTaskRequest},
    repository::task_repo::TaskRepository,
};
use sqlx::PgPool;
use std::collections::HashMap;

pub struct TaskService {
    db: PgPool,
}

impl TaskService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All tasks of a user, each with its direct subtask ids
    pub async fn list_tasks(&self, owner_id: i64) -> Result<Vec<TaskResponse>, AppError> {
        let repo = TaskRepository::new(self.db.clone());
        let tasks = repo.list_by_owner(owner_id).await?;

        // One pass over the full list is enough to attach children
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        for task in &tasks {
            if let Some(parent_id) = task.parent_id {
                children.entry(parent_id).or_default().push(task.id);
            }
        }

        Ok(tasks
            .into_iter()
            .map(|task| {
                let subtask_ids = children.remove(&task.id).unwrap_or_default();
                TaskResponse::from_task(task, subtask_ids)
            })
            .collect())
    }

    /// Create a root task, or a subtask when `parent_id` is given.
    ///
    /// The parent must exist and belong to the same owner.
    pub async fn create_task(
        &self,
        owner_id: i64,
        req: &CreateTaskRequest,
        parent_id: Option<i64>,
    ) -> Result<TaskResponse, AppError> {
        let repo = TaskRepository::new(self.db.clone());

        if let Some(parent_id) = parent_id {
            repo.find_by_id(parent_id, owner_id)
                .await?
                .ok_or(AppError::NotFound)?;
        }

        let task = repo
            .create(
                &req.title,
                req.description.as_deref(),
                parent_id,
                owner_id,
            )
            .await?;

        tracing::debug!(task_id = task.id, owner_id, "Task created");

        Ok(TaskResponse::from_task(task, Vec::new()))
    }

    /// One task with its subtask ids
    pub async fn get_task(&self, owner_id: i64, id: i64) -> Result<TaskResponse, AppError> {
        let repo = TaskRepository::new(self.db.clone());

        let task = repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let subtask_ids = repo.list_subtask_ids(id, owner_id).await?;

        Ok(TaskResponse::from_task(task, subtask_ids))
    }

    /// Replace title and description (PUT semantics)
    pub async fn replace_task(
        &self,
        owner_id: i64,
        id: i64,
        req: &CreateTaskRequest,
    ) -> Result<TaskResponse, AppError> {
        let repo = TaskRepository::new(self.db.clone());

        let task = repo
            .update(id, owner_id, &req.title, req.description.as_deref())
            .await?
            .ok_or(AppError::NotFound)?;
        let subtask_ids = repo.list_subtask_ids(id, owner_id).await?;

        Ok(TaskResponse::from_task(task, subtask_ids))
    }

    /// Update only the supplied fields (PATCH semantics)
    pub async fn patch_task(
        &self,
        owner_id: i64,
        id: i64,
        req: &UpdateTaskRequest,
    ) -> Result<TaskResponse, AppError> {
        let repo = TaskRepository::new(self.db.clone());

        let current = repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let title = req.title.as_deref().unwrap_or(&current.title);
        let description = req
            .description
            .as_deref()
            .or(current.description.as_deref());

        let task = repo
            .update(id, owner_id, title, description)
            .await?
            .ok_or(AppError::NotFound)?;
        let subtask_ids = repo.list_subtask_ids(id, owner_id).await?;

        Ok(TaskResponse::from_task(task, subtask_ids))
    }

    /// Delete a task and, transitively, its subtasks; returns the deleted task
    pub async fn delete_task(&self, owner_id: i64, id: i64) -> Result<TaskResponse, AppError> {
        let repo = TaskRepository::new(self.db.clone());

        let task = repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let subtask_ids = repo.list_subtask_ids(id, owner_id).await?;

        repo.delete(id, owner_id).await?;

        tracing::debug!(task_id = id, owner_id, "Task deleted");

        Ok(TaskResponse::from_task(task, subtask_ids))
    }
}
