//! Plugin directory resolution.

use std::path::PathBuf;

use plugscan_core::config::plugin::PluginConfig;

/// Resolves the directories discovery may scan.
pub trait PathResolver {
    /// Primary plugin directory; `None` aborts discovery.
    fn plugin_dir(&self) -> Option<PathBuf>;

    /// Whether the host runs from a build tree.
    fn running_in_build_directory(&self) -> bool;

    /// Nested build-output directory probed inside each build-tree
    /// plugin subdirectory.
    fn build_output_subdir(&self) -> &str {
        ".libs"
    }

    /// Version-qualified system plugin directory of an installed layout.
    fn versioned_plugin_dir(&self) -> Option<PathBuf>;

    /// Per-user plugin directory.
    fn personal_plugin_dir(&self) -> Option<PathBuf>;
}

/// [`PathResolver`] driven by [`PluginConfig`].
#[derive(Debug, Clone)]
pub struct ConfiguredPaths {
    plugin_dir: Option<PathBuf>,
    build_layout: bool,
    build_output_subdir: String,
    version: String,
    personal_dir: Option<PathBuf>,
}

impl ConfiguredPaths {
    /// Application directory name used under the user's data directory.
    pub const APP_DIR: &'static str = "plugscan";

    /// Builds a resolver from configuration.
    pub fn from_config(config: &PluginConfig) -> Self {
        let version = config.effective_version();
        let personal_dir = match config.personal_directory.as_deref() {
            Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
            Some(_) => None,
            None => dirs::data_local_dir()
                .map(|base| base.join(Self::APP_DIR).join("plugins").join(&version)),
        };

        Self {
            plugin_dir: config
                .directory
                .as_deref()
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            build_layout: config.build_layout,
            build_output_subdir: config.build_output_subdir.clone(),
            version,
            personal_dir,
        }
    }

    /// Version qualifier appended to the system plugin directory.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl PathResolver for ConfiguredPaths {
    fn plugin_dir(&self) -> Option<PathBuf> {
        self.plugin_dir.clone()
    }

    fn running_in_build_directory(&self) -> bool {
        self.build_layout
    }

    fn build_output_subdir(&self) -> &str {
        &self.build_output_subdir
    }

    fn versioned_plugin_dir(&self) -> Option<PathBuf> {
        self.plugin_dir.as_ref().map(|dir| dir.join(&self.version))
    }

    fn personal_plugin_dir(&self) -> Option<PathBuf> {
        self.personal_dir.clone()
    }
}
