//! Shared helpers for integration tests

use secrecy::Secret;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use task_tree::{
    auth::TokenService,
    config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    middleware::AppState,
    services::{AuthService, TaskService},
};

pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:5000".to_string(),
            graceful_shutdown_timeout_secs: 30,
        },
        database: DatabaseConfig {
            // Port 9 (discard) so any accidental query fails fast
            url: Secret::new("postgresql://127.0.0.1:9/tasktree_test".to_string()),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "error".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            secret_key: Secret::new("test_secret_key_32_characters_long!".to_string()),
            tg_token: Secret::new("123456:test-bot-token".to_string()),
            token_period_secs: 3600,
        },
    }
}

/// App state backed by a lazy pool: nothing connects until a query runs, so
/// routes that reject before touching storage are testable without a server.
pub fn create_test_app_state() -> Arc<AppState> {
    let config = create_test_config();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.acquire_timeout_secs,
        ))
        .connect_lazy("postgresql://127.0.0.1:9/tasktree_test")
        .expect("lazy pool");

    let token_service =
        Arc::new(TokenService::from_config(&config).expect("token service"));

    Arc::new(AppState {
        db: pool.clone(),
        auth_service: Arc::new(AuthService::new(pool.clone(), token_service.clone(), &config)),
        task_service: Arc::new(TaskService::new(pool)),
        token_service,
    })
}
