/// Configuration management for the feed core
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
}

/// In-memory document store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON seed file; the built-in mock dataset is used when unset
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        let seed_path = match std::env::var("FEED_STORE_SEED_PATH") {
            Ok(path) if !path.trim().is_empty() => {
                let path = PathBuf::from(path);
                std::fs::metadata(&path).with_context(|| {
                    format!("FEED_STORE_SEED_PATH {} is not readable", path.display())
                })?;
                Some(path)
            }
            _ => None,
        };

        Ok(Config {
            app,
            store: StoreConfig { seed_path },
        })
    }
}
