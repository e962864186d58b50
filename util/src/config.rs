//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is required")]
    MissingJwtSecret,
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub frontend_url: String,
    pub ws_ping_seconds: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing or malformed values fall back to development defaults, except
    /// `JWT_SECRET`, which has no default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg = Self::load();
        if cfg.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(cfg)
    }

    /// Loads and installs the global configuration. Binaries that verify tokens call
    /// this once at startup.
    pub fn init() -> Result<AppConfig, ConfigError> {
        let cfg = Self::from_env()?;
        let installed = cfg.clone();
        AppConfig::set_field(move |current| *current = installed);
        Ok(cfg)
    }

    /// Reads every key without validation. An unset `JWT_SECRET` stays empty, and an
    /// empty secret never verifies a token.
    fn load() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "edu-portal"),
            log_level: var_or("LOG_LEVEL", "portal=info"),
            log_file: var_or("LOG_FILE", "portal.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/portal.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            jwt_secret: var_or("JWT_SECRET", "").trim().to_string(),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 60),
            frontend_url: var_or("FRONTEND_URL", "http://localhost:3000"),
            ws_ping_seconds: parsed_or("WS_PING_SECONDS", 30),
        }
    }

    /// Returns a snapshot of the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> AppConfig {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::load()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
            .clone()
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::load();
            }
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::load()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_ws_ping_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.ws_ping_seconds = value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn setters_override_loaded_values() {
        AppConfig::set_jwt_secret("override-secret");
        AppConfig::set_port(4321);

        let cfg = AppConfig::global();
        assert_eq!(cfg.jwt_secret, "override-secret");
        assert_eq!(cfg.port, 4321);

        AppConfig::reset();
    }

    #[test]
    #[serial]
    fn malformed_numbers_fall_back_to_defaults() {
        unsafe { env::set_var("WS_PING_SECONDS", "not-a-number") };
        let cfg = AppConfig::load();
        assert_eq!(cfg.ws_ping_seconds, 30);
        unsafe { env::remove_var("WS_PING_SECONDS") };
    }

    #[test]
    #[serial]
    fn refuses_to_load_without_a_jwt_secret() {
        let saved = env::var("JWT_SECRET").ok();

        unsafe { env::remove_var("JWT_SECRET") };
        assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::MissingJwtSecret);
        assert!(AppConfig::init().is_err());

        unsafe { env::set_var("JWT_SECRET", "   ") };
        assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::MissingJwtSecret);

        unsafe { env::set_var("JWT_SECRET", "configured") };
        assert_eq!(AppConfig::init().unwrap().jwt_secret, "configured");
        assert_eq!(AppConfig::global().jwt_secret, "configured");

        match saved {
            Some(v) => unsafe { env::set_var("JWT_SECRET", v) },
            None => unsafe { env::remove_var("JWT_SECRET") },
        }
        AppConfig::reset();
    }
}
