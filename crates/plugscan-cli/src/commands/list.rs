//! Plugin listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use plugscan_core::config::AppConfig;
use plugscan_core::error::AppError;
use plugscan_plugin::PluginDescription;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Do not report load failures
    #[arg(long)]
    pub silent: bool,
}

/// Table row for a discovered plugin
#[derive(Debug, Serialize, Tabled)]
pub struct PluginRow {
    /// Plugin file name
    #[tabled(rename = "Name")]
    pub name: String,
    /// Exported version
    #[tabled(rename = "Version")]
    pub version: String,
    /// Plugin types
    #[tabled(rename = "Types")]
    pub types: String,
    /// Module path
    #[tabled(rename = "Path")]
    pub path: String,
}

impl From<PluginDescription> for PluginRow {
    fn from(d: PluginDescription) -> Self {
        Self {
            name: d.name,
            version: d.version,
            types: d.types,
            path: d.path,
        }
    }
}

/// Execute the list command
pub async fn execute(
    args: &ListArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mode = super::failure_mode(args.silent, &config.plugins);
    let ctx = super::discover(config.plugins, mode).await?;

    let rows: Vec<PluginRow> = ctx.descriptions().into_iter().map(PluginRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
