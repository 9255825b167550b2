//! Session token issuance and verification
//! Stateless HS256 tokens carrying `{id, exp}`; nothing is persisted, a token
//! is valid iff the signature checks out and the expiry is in the future

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Claim set embedded in a session token.
///
/// Kept minimal on purpose: the user id and an absolute unix-seconds expiry.
/// Any standard JWT verifier can consume these tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User identifier
    pub id: i64,

    /// Expiration (unix timestamp, seconds)
    pub exp: i64,
}

/// Session token service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_period_secs: u64,
}

impl TokenService {
    /// Create the token service from configuration.
    ///
    /// The secret and default period are fixed for the process lifetime;
    /// rotating the secret is an operational action that logs out everyone.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.secret_key.expose_secret();

        // HS256 needs at least 32 bytes of key material
        if secret.len() < 32 {
            return Err(AppError::Config(
                "Token secret too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_period_secs: config.security.token_period_secs,
        })
    }

    /// Issue a token for a user with the configured validity period
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_with_period(user_id, self.token_period_secs as i64)
    }

    /// Issue a token with an explicit validity period in seconds
    pub fn issue_with_period(&self, user_id: i64, period_secs: i64) -> Result<String, AppError> {
        let expiration = Utc::now() + Duration::seconds(period_secs);

        let claims = Claims {
            id: user_id,
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal
        })
    }

    /// Validate a token and return the embedded user id.
    ///
    /// A bad signature, a malformed token and an expired token are all the
    /// same `Unauthorized` to the caller. Expiry leeway is zero.
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token validation failed: {:?}", e);
            AppError::Unauthorized
        })?;

        Ok(data.claims.id)
    }

    /// Configured validity period in seconds
    pub fn token_period_secs(&self) -> u64 {
        self.token_period_secs
    }
}
