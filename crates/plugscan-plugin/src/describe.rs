//! Read-only plugin diagnostics.

use std::io::{self, Write};

use serde::Serialize;

use crate::context::PluginContext;

/// Human-readable summary of a registered plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescription {
    /// Plugin file name.
    pub name: String,
    /// Exported version string.
    pub version: String,
    /// Comma-joined type names, in type registration order.
    pub types: String,
    /// Path the module was loaded from.
    pub path: String,
}

impl PluginContext {
    /// Calls `callback(name, version, types, path)` for every plugin, in
    /// registration order.
    pub fn for_each_plugin<F>(&self, mut callback: F)
    where
        F: FnMut(&str, &str, &str, &str),
    {
        self.plugins.for_each(|plugin| {
            let types = self.types.describe(plugin.types());
            let path = plugin.path().display().to_string();
            callback(plugin.name(), plugin.version(), &types, &path);
        });
    }

    /// Collects a description of every plugin.
    pub fn descriptions(&self) -> Vec<PluginDescription> {
        let mut out = Vec::with_capacity(self.plugins.len());
        self.for_each_plugin(|name, version, types, path| {
            out.push(PluginDescription {
                name: name.to_string(),
                version: version.to_string(),
                types: types.to_string(),
                path: path.to_string(),
            });
        });
        out
    }

    /// Writes one tab-separated line per plugin: name, version, types, path.
    pub fn dump_all<W: Write>(&self, mut out: W) -> io::Result<()> {
        for d in self.descriptions() {
            writeln!(out, "{}\t{}\t{}\t{}", d.name, d.version, d.types, d.path)?;
        }
        Ok(())
    }
}
