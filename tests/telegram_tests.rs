//! Telegram login signature tests
//!
//! Verifies the canonicalization and HMAC check against payloads signed the
//! way the login widget signs them.

use hmac::{Hmac, Mac};
use secrecy::Secret;
use sha2::Sha256;
use std::collections::HashMap;
use task_tree::auth::TelegramVerifier;

const BOT_TOKEN: &str = "123456:test-bot-token";

/// Sign a canonical data string the way the widget does
fn widget_sign(data: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(BOT_TOKEN.as_bytes()).expect("hmac accepts any key length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verifier() -> TelegramVerifier {
    TelegramVerifier::new(Secret::new(BOT_TOKEN.to_string()))
}

fn payload(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_minimal_signed_payload_is_valid() {
    let mut p = payload(&[("id", "1"), ("first_name", "A")]);
    p.insert("hash".to_string(), widget_sign("first_name=A\nid=1"));

    assert!(verifier().is_valid(&p));
}

#[test]
fn test_realistic_widget_payload_is_valid() {
    let data = "auth_date=1724700000\nfirst_name=Alice\nid=987654321\nphoto_url=https://t.me/i/userpic/320/alice.jpg\nusername=alice";
    let mut p = payload(&[
        ("id", "987654321"),
        ("first_name", "Alice"),
        ("username", "alice"),
        ("photo_url", "https://t.me/i/userpic/320/alice.jpg"),
        ("auth_date", "1724700000"),
    ]);
    p.insert("hash".to_string(), widget_sign(data));

    assert!(verifier().is_valid(&p));
}

#[test]
fn test_any_mutation_invalidates() {
    let data = "auth_date=1724700000\nfirst_name=Alice\nid=987654321\nusername=alice";
    let base = {
        let mut p = payload(&[
            ("id", "987654321"),
            ("first_name", "Alice"),
            ("username", "alice"),
            ("auth_date", "1724700000"),
        ]);
        p.insert("hash".to_string(), widget_sign(data));
        p
    };
    assert!(verifier().is_valid(&base));

    for key in ["id", "first_name", "username", "auth_date"] {
        let mut mutated = base.clone();
        mutated.insert(key.to_string(), "tampered".to_string());
        assert!(!verifier().is_valid(&mutated), "mutation of {} accepted", key);
    }

    let mut dropped = base.clone();
    dropped.remove("auth_date");
    assert!(!verifier().is_valid(&dropped));
}

#[test]
fn test_missing_required_fields_return_false() {
    // No hash
    assert!(!verifier().is_valid(&payload(&[("id", "1"), ("first_name", "A")])));

    // No id
    let mut p = payload(&[("first_name", "A")]);
    p.insert("hash".to_string(), widget_sign("first_name=A"));
    assert!(!verifier().is_valid(&p));

    // Neither username nor first_name
    let mut p = payload(&[("id", "1")]);
    p.insert("hash".to_string(), widget_sign("id=1"));
    assert!(!verifier().is_valid(&p));

    // Empty payload must not panic
    assert!(!verifier().is_valid(&HashMap::new()));
}

#[test]
fn test_signature_with_wrong_secret_invalid() {
    let other = TelegramVerifier::new(Secret::new("999999:other-bot-token".to_string()));

    let mut p = payload(&[("id", "1"), ("first_name", "A")]);
    p.insert("hash".to_string(), widget_sign("first_name=A\nid=1"));

    assert!(!other.is_valid(&p));
}

#[test]
fn test_values_containing_separators_are_not_collapsed() {
    // A value with '=' or '\n' in it still signs/verifies consistently
    let data = "first_name=A=B\nid=1";
    let mut p = payload(&[("id", "1"), ("first_name", "A=B")]);
    p.insert("hash".to_string(), widget_sign(data));

    assert!(verifier().is_valid(&p));
}
