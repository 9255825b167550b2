//! Error handling unit tests

use axum::http::StatusCode;
use task_tree::error::AppError;

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        AppError::BadRequest("invalid".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Config("bad config".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(AppError::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_database_error_maps_to_500() {
    let app_error = AppError::from(sqlx::Error::RowNotFound);
    assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_auth_failures_share_one_message() {
    // Token failures, bad passwords and bad signatures must all produce the
    // same body so callers cannot probe for existing accounts.
    assert_eq!(AppError::Unauthorized.user_message(), "Wrong authentication data");
}

#[test]
fn test_database_message_hides_details() {
    let app_error = AppError::from(sqlx::Error::PoolTimedOut);
    let message = app_error.user_message();
    assert_eq!(message, "Database error occurred");
    assert!(!message.to_lowercase().contains("pool"));
}
