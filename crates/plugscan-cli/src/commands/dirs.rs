//! Shows where discovery looks for plugins.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use plugscan_core::config::AppConfig;
use plugscan_core::error::AppError;
use plugscan_plugin::prelude::*;

/// Table row for a scanned directory
#[derive(Debug, Serialize, Tabled)]
pub struct DirRow {
    /// Scan order
    #[tabled(rename = "#")]
    pub order: usize,
    /// Directory path
    #[tabled(rename = "Directory")]
    pub path: String,
    /// Whether the directory exists
    #[tabled(rename = "Exists")]
    pub exists: bool,
}

/// Execute the dirs command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let paths = ConfiguredPaths::from_config(&config.plugins);
    let privileges = ProcessPrivileges::capture();

    let rows: Vec<DirRow> = plan_directories(&paths, &privileges)
        .into_iter()
        .enumerate()
        .map(|(i, dir)| DirRow {
            order: i + 1,
            exists: dir.is_dir(),
            path: dir.display().to_string(),
        })
        .collect();

    output::print_list(&rows, format);

    if format == OutputFormat::Table {
        if paths.plugin_dir().is_none() {
            output::print_warning("No plugin directory configured; discovery is disabled");
        }
        if privileges.started_with_special_privs() {
            output::print_warning("Running with elevated privileges; personal plugins are skipped");
        }
    }
    Ok(())
}
