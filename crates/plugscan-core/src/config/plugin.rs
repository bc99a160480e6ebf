//! Plugin discovery configuration.

use serde::{Deserialize, Serialize};

/// Plugin discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Primary plugin directory. When unset or empty, discovery is skipped.
    #[serde(default = "default_plugin_directory")]
    pub directory: Option<String>,
    /// Whether the host runs from a build tree rather than an installed layout.
    #[serde(default)]
    pub build_layout: bool,
    /// Name of the nested build-output directory probed inside each
    /// subdirectory of the primary directory in a build layout.
    #[serde(default = "default_build_output_subdir")]
    pub build_output_subdir: String,
    /// Version qualifier for the system and personal plugin directories.
    ///
    /// Defaults to `<major>.<minor>` of this package.
    #[serde(default)]
    pub version: Option<String>,
    /// Per-user plugin directory override.
    #[serde(default)]
    pub personal_directory: Option<String>,
    /// File names that are never loaded, even if they look like modules.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Whether load failures are reported (verbose) or swallowed (silent).
    #[serde(default = "default_true")]
    pub report_load_failures: bool,
    /// Plugin categories the host recognizes, in registration order.
    #[serde(default = "default_types")]
    pub types: Vec<PluginTypeConfig>,
}

/// A host plugin category recognized by a required exported symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginTypeConfig {
    /// Human-readable category label, e.g. `"dissector"`.
    pub name: String,
    /// Exported symbol whose presence marks a module as this category.
    pub symbol: String,
}

impl PluginTypeConfig {
    /// Creates a type entry.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

impl PluginConfig {
    /// Returns the configured version qualifier or the package default.
    pub fn effective_version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| default_version().to_string())
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: default_plugin_directory(),
            build_layout: false,
            build_output_subdir: default_build_output_subdir(),
            version: None,
            personal_directory: None,
            exclude: Vec::new(),
            report_load_failures: true,
            types: default_types(),
        }
    }
}

fn default_plugin_directory() -> Option<String> {
    Some("./plugins".to_string())
}

fn default_build_output_subdir() -> String {
    ".libs".to_string()
}

fn default_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION_MAJOR"),
        ".",
        env!("CARGO_PKG_VERSION_MINOR")
    )
}

fn default_true() -> bool {
    true
}

fn default_types() -> Vec<PluginTypeConfig> {
    vec![
        PluginTypeConfig::new("dissector", "plugin_register"),
        PluginTypeConfig::new("file type", "register_wtap_module"),
        PluginTypeConfig::new("codec", "register_codec"),
    ]
}
