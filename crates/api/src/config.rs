//! Configuration management for the BurgerFy API
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Redis connection URL. Without one, everything is kept in memory.
    pub redis_url: Option<String>,

    /// Send the session cookie with the `Secure` flag
    pub secure_cookies: bool,

    /// Load the default catalog into an empty store on startup
    pub seed_catalog: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),

            secure_cookies: env::var("SECURE_COOKIES")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("Invalid SECURE_COOKIES (expected true/false)")?,

            seed_catalog: env::var("SEED_CATALOG")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("Invalid SEED_CATALOG (expected true/false)")?,
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if let Some(url) = &self.redis_url {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                anyhow::bail!("REDIS_URL must start with redis:// or rediss://");
            }
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
