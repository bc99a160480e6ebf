//! Plugin registry: the ordered collection of classified plugins.
//!
//! The registry owns every module handle it holds. There is no way to
//! remove a single plugin; handles are only released by [`PluginRegistry::clear`].

use std::path::Path;

use tracing::info;

use crate::error::PluginError;
use crate::module::Module;
use crate::types::TypeMask;

/// A loaded module claimed by at least one plugin type.
#[derive(Debug)]
pub struct Plugin {
    /// Opened module; closed when the plugin is dropped.
    module: Box<dyn Module>,
    /// File name, the uniqueness key.
    name: String,
    /// Value of the exported `version` string.
    version: String,
    /// Types this plugin satisfies.
    types: TypeMask,
}

impl Plugin {
    pub(crate) fn new(
        module: Box<dyn Module>,
        name: String,
        version: String,
        types: TypeMask,
    ) -> Self {
        Self {
            module,
            name,
            version,
            types,
        }
    }

    /// File name of the plugin.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version string exported by the plugin.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Classification mask.
    pub fn types(&self) -> TypeMask {
        self.types
    }

    /// Path the module was opened from.
    pub fn path(&self) -> &Path {
        self.module.path()
    }

    /// The opened module, for resolving entry points.
    pub fn module(&self) -> &dyn Module {
        self.module.as_ref()
    }
}

/// Insertion-ordered, append-only registry of plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a plugin named `name` is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }

    /// Appends a plugin.
    ///
    /// A plugin whose name is already taken is rejected; the existing
    /// entry is kept and the rejected module is closed.
    pub fn append(&mut self, plugin: Plugin) -> Result<(), PluginError> {
        if self.exists(&plugin.name) {
            return Err(PluginError::DuplicateName { name: plugin.name });
        }

        info!(
            plugin = %plugin.name,
            version = %plugin.version,
            path = %plugin.path().display(),
            "Plugin registered"
        );

        self.plugins.push(plugin);
        Ok(())
    }

    /// Looks up a plugin by name.
    pub fn get(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Visits every plugin in registration order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Plugin),
    {
        for plugin in &self.plugins {
            f(plugin);
        }
    }

    /// Iterates plugins in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Plugin> {
        self.plugins.iter()
    }

    /// Number of plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Releases every plugin and its module handle.
    ///
    /// Entry points previously resolved from these modules become dangling.
    pub fn clear(&mut self) {
        let count = self.plugins.len();
        self.plugins.clear();
        info!(count, "Plugin registry cleared");
    }
}

impl<'a> IntoIterator for &'a PluginRegistry {
    type Item = &'a Plugin;
    type IntoIter = std::slice::Iter<'a, Plugin>;

    fn into_iter(self) -> Self::IntoIter {
        self.plugins.iter()
    }
}
