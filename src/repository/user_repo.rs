//! User repository

use crate::{error::AppError, models::user::User};
use sqlx::PgPool;

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// Find every user with the given username.
    ///
    /// Usernames carry no unique constraint, so this can return more than one
    /// row; callers iterate the candidates.
    pub async fn find_all_by_username(&self, username: &str) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// Create a user; the id is assigned by the database
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        photo: Option<&str>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, photo)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(photo)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }
}
