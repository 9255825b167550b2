//! Task repository
//! All queries are owner-scoped: a task is only ever visible to its owner

use crate::{error::AppError, models::task::Task};
use sqlx::PgPool;

pub struct TaskRepository {
    db: PgPool,
}

impl TaskRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find one task belonging to the owner
    pub async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(task)
    }

    /// List every task of the owner
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(tasks)
    }

    /// Ids of the direct subtasks of a task
    pub async fn list_subtask_ids(&self, parent_id: i64, owner_id: i64) -> Result<Vec<i64>, AppError> {
        let ids: Vec<(i64,)> = sqlx::query_as(
            "SELECT id FROM tasks WHERE parent_id = $1 AND owner_id = $2 ORDER BY id",
        )
        .bind(parent_id)
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Create a task; `parent_id` of None creates a root task
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        parent_id: Option<i64>,
        owner_id: i64,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, parent_id, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(parent_id)
        .bind(owner_id)
        .fetch_one(&self.db)
        .await?;

        Ok(task)
    }

    /// Replace title and description of a task
    pub async fn update(
        &self,
        id: i64,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $3, description = $4
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.db)
        .await?;

        Ok(task)
    }

    /// Delete a task; subtasks go with it (ON DELETE CASCADE)
    pub async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
