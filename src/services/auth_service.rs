//! Authentication service: registration, password/token/Telegram login
//!
//! This is the only place that decides whether a request maps to a user.
//! Every failure path collapses to `AppError::Unauthorized` so callers cannot
//! distinguish an unknown username from a wrong password or a bad signature.

use crate::{
    auth::{PasswordHasher, TelegramVerifier, TokenService},
    config::AppConfig,
    error::AppError,
    models::auth::LoginPayload,
    models::user::User,
    repository::user_repo::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    token_service: Arc<TokenService>,
    hasher: PasswordHasher,
    telegram: TelegramVerifier,
}

impl AuthService {
    pub fn new(db: PgPool, token_service: Arc<TokenService>, config: &AppConfig) -> Self {
        Self {
            db,
            token_service,
            hasher: PasswordHasher::new(),
            telegram: TelegramVerifier::new(config.security.tg_token.clone()),
        }
    }

    /// Create an account and hand back the user with a fresh session token
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        photo: Option<&str>,
    ) -> Result<(User, String), AppError> {
        let password_hash = self.hasher.hash(password)?;

        let user_repo = UserRepository::new(self.db.clone());
        let user = user_repo.create(username, &password_hash, photo).await?;

        tracing::info!(user_id = user.id, "User registered");

        let token = self.issue_session_token(&user)?;
        Ok((user, token))
    }

    /// Resolve a bearer token to its user.
    ///
    /// A valid signature whose user no longer exists is still `Unauthorized`;
    /// whether the id ever existed is not leaked.
    pub async fn authenticate_token(&self, token: &str) -> Result<User, AppError> {
        let user_id = self.token_service.verify(token)?;

        let user_repo = UserRepository::new(self.db.clone());
        user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Password login.
    ///
    /// Usernames are not unique: every candidate row is tried and the first
    /// verifying hash wins.
    pub async fn authenticate_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db.clone());
        let candidates = user_repo.find_all_by_username(username).await?;

        self.verify_candidates(candidates, password)
            .ok_or(AppError::Unauthorized)
    }

    /// First candidate whose stored hash verifies the password.
    ///
    /// An empty candidate list still performs one dummy hash computation, so
    /// a failed login costs one Argon2 operation per candidate-or-dummy and
    /// response latency does not reveal whether the username exists.
    fn verify_candidates(&self, candidates: Vec<User>, password: &str) -> Option<User> {
        if candidates.is_empty() {
            let _ = self.hasher.hash(password);
            return None;
        }

        candidates
            .into_iter()
            .find(|user| self.hasher.verify(password, &user.password_hash))
    }

    /// Telegram login: verify the widget signature, then match an existing
    /// account or auto-provision one.
    pub async fn login_or_register_telegram(
        &self,
        payload: &LoginPayload,
    ) -> Result<User, AppError> {
        if !self.telegram.is_valid(payload) {
            return Err(AppError::Unauthorized);
        }

        // is_valid guarantees `id` and at least one name field are present
        let username = derive_username(payload).ok_or(AppError::Unauthorized)?;
        let provider_id = payload.get("id").ok_or(AppError::Unauthorized)?;

        let user_repo = UserRepository::new(self.db.clone());
        let candidates = user_repo.find_all_by_username(&username).await?;
        for user in candidates {
            if self.telegram_credentials_match(&user, provider_id) {
                return Ok(user);
            }
        }

        let password_hash = self.hasher.hash(provider_id)?;
        let user = user_repo
            .create(
                &username,
                &password_hash,
                payload.get("photo_url").map(String::as_str),
            )
            .await?;

        tracing::info!(user_id = user.id, "User provisioned via Telegram login");

        Ok(user)
    }

    /// Combined login used by the token endpoint: password first, then the
    /// Telegram path.
    pub async fn login(&self, payload: &LoginPayload) -> Result<User, AppError> {
        if let (Some(username), Some(password)) =
            (payload.get("username"), payload.get("password"))
        {
            match self.authenticate_password(username, password).await {
                Ok(user) => return Ok(user),
                Err(AppError::Unauthorized) => {}
                Err(e) => return Err(e),
            }
        }

        self.login_or_register_telegram(payload).await
    }

    /// Issue a session token for an authenticated user
    pub fn issue_session_token(&self, user: &User) -> Result<String, AppError> {
        self.token_service.issue(user.id)
    }

    /// Re-login check for accounts provisioned through Telegram: the account
    /// password is the stringified provider id. Deliberately the only place
    /// that knows about this scheme.
    fn telegram_credentials_match(&self, user: &User, provider_id: &str) -> bool {
        self.hasher.verify(provider_id, &user.password_hash)
    }
}

/// Account name for a Telegram payload: the provider username, or first and
/// second name joined with a space.
fn derive_username(payload: &LoginPayload) -> Option<String> {
    if let Some(username) = payload.get("username") {
        return Some(username.clone());
    }
    payload.get("first_name").map(|first| {
        let second = payload.get("second_name").map(String::as_str).unwrap_or("");
        format!("{} {}", first, second)
    })
}
