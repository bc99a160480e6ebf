//! Plugin context: the single owner of all discovery state.
//!
//! One context replaces the process-wide registries. The host builds it at
//! startup, registers its plugin types, runs discovery once, and drops or
//! [`cleanup`](PluginContext::cleanup)s it at shutdown. A context is not
//! meant to be shared across threads while discovery is running.

use std::fmt;
use std::sync::Arc;

use plugscan_core::config::plugin::PluginTypeConfig;
use tracing::debug;

use crate::error::PluginError;
use crate::loader::NativeLoader;
use crate::module::ModuleLoader;
use crate::registry::PluginRegistry;
use crate::report::{Reporter, TracingReporter};
use crate::types::{PluginType, PluginTypeRegistry, TypePredicate};

/// Decides whether a candidate file name must be skipped.
pub type ExclusionFilter = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Owns the type registry, the plugin registry and their collaborators.
pub struct PluginContext {
    pub(crate) types: PluginTypeRegistry,
    pub(crate) plugins: PluginRegistry,
    pub(crate) loader: Box<dyn ModuleLoader>,
    pub(crate) reporter: Arc<dyn Reporter>,
    pub(crate) exclusion: Option<ExclusionFilter>,
    pub(crate) module_suffix: String,
    pub(crate) discovered: bool,
}

impl PluginContext {
    /// Creates a context using the native loader and `tracing` reports.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a context with custom collaborators.
    pub fn builder() -> PluginContextBuilder {
        PluginContextBuilder::default()
    }

    /// Registers a plugin type and returns its bit index.
    ///
    /// Beyond the 32nd type the registration is reported and ignored;
    /// the error is returned for callers that care.
    pub fn register_type(
        &mut self,
        name: impl Into<String>,
        predicate: TypePredicate,
    ) -> Result<u8, PluginError> {
        let name = name.into();
        match self.types.register(name.clone(), predicate) {
            Ok(bit_index) => {
                debug!(plugin_type = %name, bit_index, "Plugin type registered");
                Ok(bit_index)
            }
            Err(e) => {
                self.reporter.failure(&e.to_string());
                Err(e)
            }
        }
    }

    /// Registers configured types, each recognized by its required symbol.
    ///
    /// Returns how many were accepted.
    pub fn register_configured_types(&mut self, types: &[PluginTypeConfig]) -> usize {
        let mut accepted = 0;
        for ty in types {
            let predicate = PluginType::requires_symbol(ty.symbol.clone());
            if self.register_type(ty.name.clone(), predicate).is_ok() {
                accepted += 1;
            }
        }
        accepted
    }

    /// Registered plugin types.
    pub fn types(&self) -> &PluginTypeRegistry {
        &self.types
    }

    /// Registered plugins.
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Suffix a file name must end in to be considered a module.
    pub fn module_suffix(&self) -> &str {
        &self.module_suffix
    }

    /// Whether a discovery pass already ran.
    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// Releases every plugin, its module handle, and every plugin type.
    ///
    /// Must not be called while anything still uses entry points
    /// resolved from a plugin.
    pub fn cleanup(&mut self) {
        self.plugins.clear();
        self.types.clear();
        self.discovered = false;
    }

    pub(crate) fn is_excluded(&self, file_name: &str) -> bool {
        self.exclusion
            .as_ref()
            .is_some_and(|filter| filter(file_name))
    }
}

impl Default for PluginContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContext")
            .field("types", &self.types.len())
            .field("plugins", &self.plugins.len())
            .field("module_suffix", &self.module_suffix)
            .field("discovered", &self.discovered)
            .finish_non_exhaustive()
    }
}

/// Builder for [`PluginContext`].
pub struct PluginContextBuilder {
    loader: Option<Box<dyn ModuleLoader>>,
    reporter: Option<Arc<dyn Reporter>>,
    exclusion: Option<ExclusionFilter>,
    module_suffix: String,
}

impl Default for PluginContextBuilder {
    fn default() -> Self {
        Self {
            loader: None,
            reporter: None,
            exclusion: None,
            module_suffix: std::env::consts::DLL_EXTENSION.to_string(),
        }
    }
}

impl PluginContextBuilder {
    /// Uses a custom module loader.
    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Uses a custom reporter.
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Skips files for which `filter` returns `true`.
    pub fn exclude<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.exclusion = Some(Box::new(filter));
        self
    }

    /// Skips files whose name is in `names`.
    pub fn exclude_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return self;
        }
        self.exclude(move |file_name| names.iter().any(|n| n == file_name))
    }

    /// Overrides the loadable-module suffix (without the dot).
    pub fn module_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.module_suffix = suffix.into().trim_start_matches('.').to_string();
        self
    }

    /// Builds the context.
    pub fn build(self) -> PluginContext {
        PluginContext {
            types: PluginTypeRegistry::new(),
            plugins: PluginRegistry::new(),
            loader: self.loader.unwrap_or_else(|| Box::new(NativeLoader::new())),
            reporter: self
                .reporter
                .unwrap_or_else(|| Arc::new(TracingReporter)),
            exclusion: self.exclusion,
            module_suffix: self.module_suffix,
            discovered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;
    use crate::report::{MemoryReporter, Severity};
    use crate::types::MAX_PLUGIN_TYPES;

    fn always() -> TypePredicate {
        Box::new(|_: &dyn Module| true)
    }

    #[test]
    fn test_register_type_reports_overflow() {
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = PluginContext::builder().reporter(reporter.clone()).build();

        for i in 0..MAX_PLUGIN_TYPES {
            assert_eq!(ctx.register_type(format!("t{i}"), always()).unwrap(), i as u8);
        }
        assert!(reporter.is_empty());

        assert!(ctx.register_type("overflow", always()).is_err());
        let failures = reporter.with_severity(Severity::Failure);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            "At most 32 plugin types can be supported, so the plugin type 'overflow' won't be supported."
        );
        assert_eq!(ctx.types().len(), MAX_PLUGIN_TYPES);
    }

    #[test]
    fn test_register_configured_types() {
        let mut ctx = PluginContext::new();
        let accepted = ctx.register_configured_types(&[
            PluginTypeConfig::new("dissector", "plugin_register"),
            PluginTypeConfig::new("codec", "register_codec"),
        ]);
        assert_eq!(accepted, 2);
        assert_eq!(ctx.types().get("codec").map(PluginType::bit_index), Some(1));
    }

    #[test]
    fn test_exclude_names() {
        let ctx = PluginContext::builder()
            .exclude_names(["nordic_ble.dll"])
            .build();
        assert!(ctx.is_excluded("nordic_ble.dll"));
        assert!(!ctx.is_excluded("other.dll"));
    }

    #[test]
    fn test_module_suffix_strips_dot() {
        let ctx = PluginContext::builder().module_suffix(".mod").build();
        assert_eq!(ctx.module_suffix(), "mod");

        let ctx = PluginContext::new();
        assert_eq!(ctx.module_suffix(), std::env::consts::DLL_EXTENSION);
    }

    #[test]
    fn test_cleanup_empties_both_registries() {
        let mut ctx = PluginContext::new();
        ctx.register_type("dissector", always()).unwrap();
        ctx.cleanup();
        assert!(ctx.types().is_empty());
        assert!(ctx.plugins().is_empty());
        assert!(!ctx.is_discovered());
    }
}
