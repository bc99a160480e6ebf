//! Discovery orchestrator: picks directories and scans them once.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::context::PluginContext;
use crate::paths::PathResolver;
use crate::privileges::PrivilegeCheck;
use crate::report::LoadFailureMode;

/// Lists the directories a discovery pass scans, in scan order.
///
/// - No primary directory: nothing.
/// - Build layout: the primary directory, then every immediate
///   subdirectory in name order, each replaced by its build-output
///   subdirectory when that exists.
/// - Installed layout: the version-qualified system directory.
/// - Unprivileged processes additionally get the personal directory.
pub fn plan_directories(paths: &dyn PathResolver, privileges: &dyn PrivilegeCheck) -> Vec<PathBuf> {
    let Some(plugin_dir) = paths.plugin_dir() else {
        debug!("No plugin directory configured");
        return Vec::new();
    };

    let mut dirs = Vec::new();
    if paths.running_in_build_directory() {
        let mut subdirs: Vec<PathBuf> = match fs::read_dir(&plugin_dir) {
            Ok(entries) => entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect(),
            Err(e) => {
                debug!(dir = %plugin_dir.display(), error = %e, "Cannot list build plugin directory");
                return personal_only(paths, privileges);
            }
        };
        subdirs.sort();

        dirs.push(plugin_dir);
        for subdir in subdirs {
            let nested = subdir.join(paths.build_output_subdir());
            if nested.is_dir() {
                dirs.push(nested);
            } else {
                dirs.push(subdir);
            }
        }
    } else if let Some(versioned) = paths.versioned_plugin_dir() {
        dirs.push(versioned);
    }

    dirs.extend(personal_only(paths, privileges));
    dirs
}

fn personal_only(paths: &dyn PathResolver, privileges: &dyn PrivilegeCheck) -> Vec<PathBuf> {
    if privileges.started_with_special_privs() {
        debug!("Started with special privileges, skipping personal plugin directory");
        return Vec::new();
    }
    paths.personal_plugin_dir().into_iter().collect()
}

impl PluginContext {
    /// Runs the discovery pass.
    ///
    /// Runs at most once per context: later calls return immediately, as
    /// does any call made while the plugin registry is non-empty. Returns
    /// the directories that were scanned.
    pub fn discover(
        &mut self,
        paths: &dyn PathResolver,
        privileges: &dyn PrivilegeCheck,
        mode: LoadFailureMode,
    ) -> Vec<PathBuf> {
        if self.discovered || !self.plugins.is_empty() {
            debug!("Plugin discovery already ran");
            return Vec::new();
        }

        let dirs = plan_directories(paths, privileges);
        if dirs.is_empty() {
            return dirs;
        }
        self.discovered = true;

        let mut registered = 0;
        for dir in &dirs {
            registered += self.scan_dir(dir, mode).registered;
        }

        info!(
            directories = dirs.len(),
            plugins = registered,
            types = self.types.len(),
            "Plugin discovery complete"
        );
        dirs
    }
}
