//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate,
//! layered as: base file, environment overlay, `PLUGSCAN__*` variables.

pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin discovery settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default` plus the `config/{env}` overlay.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default.toml", env)
    }

    /// Load configuration from `base`, overlaid with a sibling file named
    /// after `env` and with environment variables prefixed `PLUGSCAN__`.
    ///
    /// Both files are optional; missing files fall back to defaults.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let overlay = Path::new(base).with_file_name(env);
        let overlay = overlay.to_string_lossy();

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix("PLUGSCAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the engine cannot honor.
    pub fn validate(&self) -> Result<(), AppError> {
        for (i, ty) in self.plugins.types.iter().enumerate() {
            if ty.name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "plugins.types[{i}] has an empty name"
                )));
            }
            if ty.symbol.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "plugin type '{}' has an empty symbol",
                    ty.name
                )));
            }
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(AppError::validation(format!(
                "logging.format must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}
