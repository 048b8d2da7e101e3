//! Application configuration loaded from `config.toml`, with environment overrides.
//!
//! `DATABASE_URL` replaces `database_url` and `HISAB_ENV` replaces `environment`. A missing
//! `config.toml` is not an error; every setting has a default.

/// Database configuration and connection management
pub mod database;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{env, path::Path, path::PathBuf};
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment; session cookies are marked `Secure`
    Production,
}

impl Environment {
    /// Parses an environment name. Anything other than `production`/`prod` is development.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// True in production.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie name read by route protection
    pub cookie_name: String,
    /// Cookie lifetime in days
    pub max_age_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            max_age_days: 7,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote store database URL
    pub database_url: String,
    /// Deployment environment
    pub environment: Environment,
    /// Session cookie settings
    pub session: SessionConfig,
    /// Bootstrap fixture to hydrate from when nobody is signed in; the bundled demo when unset
    pub fixture_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: database::DEFAULT_DATABASE_URL.to_string(),
            environment: Environment::default(),
            session: SessionConfig::default(),
            fixture_path: None,
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Applies `DATABASE_URL` and `HISAB_ENV` when they are set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(env::var("DATABASE_URL").ok(), env::var("HISAB_ENV").ok())
    }

    fn with_overrides(mut self, database_url: Option<String>, environment: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|url| !url.trim().is_empty()) {
            debug!("DATABASE_URL overrides configured database");
            self.database_url = url;
        }
        if let Some(name) = environment {
            self.environment = Environment::parse(&name);
        }
        self
    }
}

/// Loads configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config file
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    AppConfig::from_toml_str(&contents)
}

/// Loads `config.toml` (or the file named by `HISAB_CONFIG`) and applies environment overrides.
///
/// Falls back to defaults when the file does not exist.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = env::var("HISAB_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!(path = %path, "No config file found, using defaults");
        AppConfig::default()
    };
    let config = config.with_env_overrides();
    info!(
        environment = ?config.environment,
        cookie = %config.session.cookie_name,
        "Application configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            database_url = "sqlite://data/test.sqlite?mode=rwc"
            environment = "production"
            fixture_path = "fixtures/demo.json"

            [session]
            cookie_name = "hisab_session"
            max_age_days = 14
        "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "sqlite://data/test.sqlite?mode=rwc");
        assert!(config.environment.is_production());
        assert_eq!(config.session.cookie_name, "hisab_session");
        assert_eq!(config.session.max_age_days, 14);
        assert_eq!(config.fixture_path, Some(PathBuf::from("fixtures/demo.json")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.session.max_age_days, 7);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = AppConfig::from_toml_str("database_url = [");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("sqlite::memory:".to_string()), Some("PROD".to_string()));
        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(config.environment.is_production());

        let untouched = AppConfig::default().with_overrides(Some("  ".to_string()), None);
        assert_eq!(untouched, AppConfig::default());
    }
}
