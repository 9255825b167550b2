//! Telegram login widget signature verification
//!
//! The widget delivers a flat string map plus a `hash` field: the HMAC-SHA256
//! hex digest of the remaining pairs, sorted by key and joined as `key=value`
//! lines, keyed with the shared bot token. Verification is pure; binding a
//! valid payload to an account happens in the auth service.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for Telegram login payloads
pub struct TelegramVerifier {
    secret: Secret<String>,
}

impl TelegramVerifier {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// Check a login payload against the shared secret.
    ///
    /// Returns false when `hash` or `id` is missing, when both `username` and
    /// `first_name` are missing, or when the signature does not match. Never
    /// errors on malformed input.
    pub fn is_valid(&self, payload: &HashMap<String, String>) -> bool {
        let Some(supplied) = payload.get("hash") else {
            return false;
        };
        if !payload.contains_key("id") {
            return false;
        }
        if !payload.contains_key("username") && !payload.contains_key("first_name") {
            return false;
        }

        // The digest the widget sends is lowercase hex; exact, case-sensitive
        // match is part of the wire contract.
        let Ok(supplied_bytes) = hex::decode(supplied) else {
            return false;
        };
        if supplied.bytes().any(|b| b.is_ascii_uppercase()) {
            return false;
        }

        let data = canonical_data_string(payload);

        let mut mac = match HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(data.as_bytes());

        // verify_slice is a constant-time comparison
        mac.verify_slice(&supplied_bytes).is_ok()
    }
}

/// Build the canonical data-check string: all pairs except `hash`, sorted
/// lexicographically by key, joined as `key=value` lines.
fn canonical_data_string(payload: &HashMap<String, String>) -> String {
    let mut entries: Vec<(&str, &str)> = payload
        .iter()
        .filter(|(k, _)| k.as_str() != "hash")
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}
