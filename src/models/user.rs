//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User account row.
///
/// `password_hash` is always the output of the one-way hasher; the plaintext
/// never touches storage. Usernames are not unique (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    /// Avatar URL, if any
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 32, message = "Username and password required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Username and password required."))]
    pub password: String,
    pub photo: Option<String>,
}

/// User response (never includes the password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub photo: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            photo: user.photo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            photo: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let json = serde_json::to_string(&UserResponse::from(sample_user())).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_register_request_rejects_empty_fields() {
        let empty_username = RegisterRequest {
            username: String::new(),
            password: "secret123".to_string(),
            photo: None,
        };
        assert!(empty_username.validate().is_err());

        let empty_password = RegisterRequest {
            username: "alice".to_string(),
            password: String::new(),
            photo: None,
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_register_request_accepts_valid_input() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
            photo: Some("https://example.com/a.jpg".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
