//! Configuration system
//! Loads all settings from environment variables, wrapping secrets in `Secret`

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:3000"
    pub addr: String,
    /// Graceful shutdown timeout in seconds
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (Secret so it never ends up in logs)
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Session token signing secret. Rotating it invalidates every
    /// outstanding token (stateless tokens, no revocation list), which is the
    /// intended force-logout-all semantics.
    pub secret_key: Secret<String>,
    /// Shared secret for the Telegram login widget (the bot token)
    pub tg_token: Secret<String>,
    /// Session token validity period in seconds
    pub token_period_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // Defaults are for development only; production deployments must set
        // SECRET_KEY, TG_TOKEN and DATABASE_URL explicitly.
        settings = settings
            .set_default("server.addr", "0.0.0.0:5000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.url", "postgresql://localhost/tasktree")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default(
                "security.secret_key",
                "change-this-secret-in-production-min-32-chars!",
            )?
            .set_default("security.tg_token", "change-this-bot-token")?
            // ~12 months; production should shorten via TOKEN_PERIOD
            .set_default("security.token_period_secs", 32_140_800)?;

        // Nested overrides with the TASKTREE_ prefix, e.g.
        // TASKTREE_SERVER__ADDR, TASKTREE_SECURITY__TOKEN_PERIOD_SECS
        settings = settings.add_source(
            Environment::with_prefix("TASKTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Flat variables from the deployment contract take precedence
        if let Ok(v) = std::env::var("DATABASE_URL") {
            settings = settings.set_override("database.url", v)?;
        }
        if let Ok(v) = std::env::var("SECRET_KEY") {
            settings = settings.set_override("security.secret_key", v)?;
        }
        if let Ok(v) = std::env::var("TG_TOKEN") {
            settings = settings.set_override("security.tg_token", v)?;
        }
        if let Ok(v) = std::env::var("TOKEN_PERIOD") {
            let secs: u64 = v.parse().map_err(|_| {
                ConfigError::Message(format!("TOKEN_PERIOD must be a number of seconds, got {v:?}"))
            })?;
            settings = settings.set_override("security.token_period_secs", secs)?;
        }

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration consistency
    fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // HS256 wants at least 256 bits of key material
        if self.security.secret_key.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "SECRET_KEY too short (min 32 chars)".to_string(),
            ));
        }

        if self.security.token_period_secs == 0 {
            return Err(ConfigError::Message(
                "TOKEN_PERIOD must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:5000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                secret_key: Secret::new("test_secret_key_32_characters_long!".to_string()),
                tg_token: Secret::new("123456:test-bot-token".to_string()),
                token_period_secs: 3600,
            },
        }
    }

    #[test]
    fn test_validate_accepts_base_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = base_config();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_format() {
        let mut config = base_config();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut config = base_config();
        config.security.secret_key = Secret::new("short".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_token_period() {
        let mut config = base_config();
        config.security.token_period_secs = 0;
        assert!(config.validate().is_err());
    }
}
