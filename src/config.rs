//! Application configuration
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the admin panel backend API
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Freshness window for cached collection snapshots, in seconds
    pub cache_freshness_secs: u64,
    /// Environment (development/production)
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        };

        // Accept either the standard API_BASE_URL or the platform's
        // BACKEND_URL alias.
        let api_base_url = env::var("API_BASE_URL")
            .or_else(|_| env::var("BACKEND_URL"))
            .map_err(|_| {
                ConfigError::Missing("API_BASE_URL or BACKEND_URL is required".to_string())
            })?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Config {
            api_base_url,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            cache_freshness_secs: env::var("CACHE_FRESHNESS_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300), // 5 minutes default
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
