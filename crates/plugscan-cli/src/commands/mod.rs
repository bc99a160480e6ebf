//! CLI command definitions and dispatch.

pub mod config;
pub mod dirs;
pub mod dump;
pub mod list;
pub mod types;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use plugscan_core::config::AppConfig;
use plugscan_core::config::plugin::PluginConfig;
use plugscan_core::error::AppError;
use plugscan_plugin::prelude::*;

/// Native plugin discovery and diagnostics
#[derive(Debug, Parser)]
#[command(name = "plugscan", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay to apply (a sibling file of the config)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover plugins and list them
    List(list::ListArgs),
    /// Discover plugins and print a tab-separated dump
    Dump(dump::DumpArgs),
    /// Show the directories discovery would scan
    Dirs,
    /// Show the configured plugin types
    Types,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::List(args) => list::execute(args, config, self.format).await,
            Commands::Dump(args) => dump::execute(args, config).await,
            Commands::Dirs => dirs::execute(&config, self.format),
            Commands::Types => types::execute(&config, self.format),
            Commands::Config(args) => {
                config::execute(args, &config, &self.config, self.format).await
            }
        }
    }
}

/// Helper: build a context with the configured types and exclusions
pub fn build_context(config: &PluginConfig) -> PluginContext {
    let mut ctx = PluginContext::builder()
        .reporter(Arc::new(TracingReporter))
        .exclude_names(config.exclude.clone())
        .build();
    ctx.register_configured_types(&config.types);
    ctx
}

/// Helper: pick the failure mode from flags and configuration
pub fn failure_mode(silent: bool, config: &PluginConfig) -> LoadFailureMode {
    if silent {
        LoadFailureMode::Silent
    } else {
        LoadFailureMode::from_verbose(config.report_load_failures)
    }
}

/// Helper: run discovery off the async runtime
pub async fn discover(config: PluginConfig, mode: LoadFailureMode) -> Result<PluginContext, AppError> {
    let privileges = ProcessPrivileges::capture();

    tokio::task::spawn_blocking(move || {
        let paths = ConfiguredPaths::from_config(&config);
        let mut ctx = build_context(&config);
        let scanned = ctx.discover(&paths, &privileges, mode);
        tracing::debug!(directories = scanned.len(), "Discovery finished");
        ctx
    })
    .await
    .map_err(|e| AppError::internal(format!("Discovery task failed: {e}")))
}
