//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use plugscan_core::config::AppConfig;
use plugscan_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

const DEFAULT_CONFIG: &str = include_str!("../../../../config/default.toml");

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(config, format);
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                output::print_kv(
                    "Plugin directory",
                    config.plugins.directory.as_deref().unwrap_or("(none)"),
                );
                output::print_kv("Build layout", &config.plugins.build_layout.to_string());
                output::print_kv("Version", &config.plugins.effective_version());
                output::print_kv("Plugin types", &config.plugins.types.len().to_string());
                output::print_kv("Excluded", &config.plugins.exclude.join(", "));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, DEFAULT_CONFIG)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_default_config_parses() {
        let config = AppConfig::from_toml_str(DEFAULT_CONFIG).expect("default config");
        assert_eq!(config.plugins.types.len(), 3);
        assert!(config.plugins.report_load_failures);
    }
}
