//! Session token unit tests
//!
//! Issue/verify round trips, expiry handling, secret binding

use task_tree::auth::TokenService;

mod common;

fn token_service() -> TokenService {
    TokenService::from_config(&common::create_test_config()).expect("token service")
}

#[test]
fn test_issue_and_verify_returns_user_id() {
    let service = token_service();

    for user_id in [1, 42, i64::MAX] {
        let token = service.issue(user_id).expect("issue");
        assert_eq!(service.verify(&token).expect("verify"), user_id);
    }
}

#[test]
fn test_token_has_three_segments() {
    let service = token_service();
    let token = service.issue(1).expect("issue");
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_expired_token_is_invalid() {
    let service = token_service();

    let token = service.issue_with_period(1, -60).expect("issue");
    assert!(service.verify(&token).is_err());
}

#[test]
fn test_token_with_other_secret_is_invalid() {
    let mut config = common::create_test_config();
    config.security.secret_key =
        secrecy::Secret::new("another_secret_key_32_chars_long!!!".to_string());
    let other = TokenService::from_config(&config).expect("token service");

    let token = token_service().issue(1).expect("issue");
    assert!(other.verify(&token).is_err());
}

#[test]
fn test_malformed_tokens_are_invalid() {
    let service = token_service();

    for garbage in ["", "abc", "a.b", "a.b.c", "ey.ey.ey"] {
        assert!(service.verify(garbage).is_err(), "accepted {:?}", garbage);
    }
}

#[test]
fn test_configured_period_is_used() {
    let service = token_service();
    assert_eq!(service.token_period_secs(), 3600);
}
