//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use pulseboard_core::DashboardError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `PULSEBOARD__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, DashboardError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, DashboardError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), DashboardError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, DashboardError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("PULSEBOARD_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config layer from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PULSEBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_dashboard_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_dashboard_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Validates a loaded configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), DashboardError> {
    if config.client.mode.is_network() {
        let parsed = url::Url::parse(&config.client.base_url).map_err(|e| {
            DashboardError::Configuration(format!(
                "client.base_url '{}' is not a valid URL: {}",
                config.client.base_url, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DashboardError::Configuration(format!(
                "client.base_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if config.client.timeout_secs == 0 {
            return Err(DashboardError::Configuration(
                "client.timeout_secs must be greater than zero".to_string(),
            ));
        }
    }

    if config.retry.max_attempts == 0 {
        return Err(DashboardError::Configuration(
            "retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if config.retry.multiplier < 1.0 {
        return Err(DashboardError::Configuration(
            "retry.multiplier must be at least 1.0".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_dashboard_error(err: ConfigError) -> DashboardError {
    DashboardError::Configuration(err.to_string())
}
