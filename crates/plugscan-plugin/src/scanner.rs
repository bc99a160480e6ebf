//! Directory scanner: opens, validates and classifies candidate modules.

use std::fs;
use std::path::Path;

use plugscan_plugin_sdk::abi::VERSION_SYMBOL;
use tracing::debug;

use crate::context::PluginContext;
use crate::error::PluginError;
use crate::registry::Plugin;
use crate::report::LoadFailureMode;

/// Per-directory scan counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Plugins added to the registry.
    pub registered: usize,
    /// Module-looking files that were not registered.
    pub rejected: usize,
}

impl PluginContext {
    /// Registers every eligible module in `dir` (non-recursive).
    ///
    /// A missing directory, or a path that is not a directory, is a silent
    /// no-op. Entries are visited in file-name order. Every failure is
    /// non-fatal; in [`LoadFailureMode::Report`] it is forwarded to the
    /// reporter and the scan moves on.
    pub fn scan_dir(&mut self, dir: &Path, mode: LoadFailureMode) -> ScanStats {
        let mut stats = ScanStats::default();

        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Plugin directory absent, skipping");
            return stats;
        }

        let mut entries = match fs::read_dir(dir) {
            Ok(entries) => entries.flatten().collect::<Vec<_>>(),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Failed to read plugin directory");
                return stats;
            }
        };
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                debug!(entry = ?file_name, "Skipping non UTF-8 file name");
                continue;
            };

            if !self.has_module_suffix(name) {
                continue;
            }
            if entry.file_type().is_ok_and(|ft| ft.is_dir()) {
                continue;
            }
            if self.is_excluded(name) {
                debug!(plugin = %name, "Plugin excluded by filter");
                continue;
            }

            match self.load_candidate(&entry.path(), name) {
                Ok(plugin) => {
                    if let Err(e) = self.plugins.append(plugin) {
                        self.reject(mode, &e);
                        stats.rejected += 1;
                    } else {
                        stats.registered += 1;
                    }
                }
                Err(e) => {
                    self.reject(mode, &e);
                    stats.rejected += 1;
                }
            }
        }

        debug!(
            dir = %dir.display(),
            registered = stats.registered,
            rejected = stats.rejected,
            "Plugin directory scanned"
        );
        stats
    }

    /// Opens, validates and classifies one candidate file.
    fn load_candidate(&self, path: &Path, name: &str) -> Result<Plugin, PluginError> {
        if self.plugins.exists(name) {
            return Err(PluginError::DuplicateName {
                name: name.to_string(),
            });
        }

        let module = self.loader.open(path)?;

        let Some(version) = module.string_symbol(VERSION_SYMBOL) else {
            return Err(PluginError::MissingVersion {
                name: name.to_string(),
            });
        };

        let types = self.types.classify(module.as_ref());
        if types.is_empty() {
            return Err(PluginError::NoRegistrationRoutines {
                name: name.to_string(),
            });
        }

        debug!(
            plugin = %name,
            types = %self.types.describe(types),
            "Plugin classified"
        );
        Ok(Plugin::new(module, name.to_string(), version, types))
    }

    fn has_module_suffix(&self, name: &str) -> bool {
        name.rsplit_once('.')
            .is_some_and(|(_, ext)| ext == self.module_suffix)
    }

    fn reject(&self, mode: LoadFailureMode, err: &PluginError) {
        debug!(reason = %err, "Plugin candidate rejected");
        if !mode.is_verbose() {
            return;
        }
        match err {
            PluginError::DuplicateName { .. } => self.reporter.warning(&err.to_string()),
            _ => self.reporter.failure(&err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::module::Module;
    use crate::report::{MemoryReporter, Severity};
    use crate::testing::{FakeLoader, write_module};
    use crate::types::{PluginType, TypePredicate};

    fn always() -> TypePredicate {
        Box::new(|_: &dyn Module| true)
    }

    fn context(loader: FakeLoader, reporter: Arc<MemoryReporter>) -> PluginContext {
        PluginContext::builder()
            .loader(loader)
            .reporter(reporter)
            .module_suffix("mod")
            .build()
    }

    #[test]
    fn test_missing_directory_is_silent_noop() {
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), reporter.clone());

        let stats = ctx.scan_dir(Path::new("/nonexistent/plugscan/plugins"), LoadFailureMode::Report);
        assert_eq!(stats, ScanStats::default());
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_file_path_is_not_scanned() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = write_module(dir.path(), "foo.mod", &["version=1.0"]);
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), reporter.clone());
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(&file, LoadFailureMode::Report);
        assert!(ctx.plugins().is_empty());
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_registers_classified_modules_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "b.mod", &["version=2.0", "symbol=register_codec"]);
        write_module(dir.path(), "a.mod", &["version=1.0", "symbol=plugin_register"]);
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), reporter.clone());
        ctx.register_type("dissector", PluginType::requires_symbol("plugin_register"))
            .unwrap();
        ctx.register_type("codec", PluginType::requires_symbol("register_codec"))
            .unwrap();

        let stats = ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        assert_eq!(stats.registered, 2);

        let plugins: Vec<_> = ctx.plugins().iter().collect();
        assert_eq!(plugins[0].name(), "a.mod");
        assert_eq!(plugins[0].version(), "1.0");
        assert_eq!(plugins[0].types().bits(), 0b01);
        assert_eq!(plugins[1].name(), "b.mod");
        assert_eq!(plugins[1].types().bits(), 0b10);
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_skips_files_without_module_suffix() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "readme.txt", &["version=1.0"]);
        write_module(dir.path(), "mod", &["version=1.0"]);
        write_module(dir.path(), "foo.mod.bak", &["version=1.0"]);
        let loader = FakeLoader::new();
        let opened = loader.opened_handle();
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(loader, reporter.clone());
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        assert!(opened.lock().unwrap().is_empty());
        assert!(ctx.plugins().is_empty());
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_excluded_names_are_never_opened() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "builtin.mod", &["version=1.0"]);
        write_module(dir.path(), "extra.mod", &["version=1.0"]);
        let loader = FakeLoader::new();
        let opened = loader.opened_handle();
        let mut ctx = PluginContext::builder()
            .loader(loader)
            .reporter(Arc::new(MemoryReporter::new()))
            .module_suffix("mod")
            .exclude_names(["builtin.mod"])
            .build();
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        let opened = opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].ends_with("extra.mod"));
        assert!(ctx.plugins().exists("extra.mod"));
        assert!(!ctx.plugins().exists("builtin.mod"));
    }

    #[test]
    fn test_missing_version_verbose_reports_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "bar.mod", &["symbol=plugin_register"]);
        let loader = FakeLoader::new();
        let live = loader.live_handle();
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(loader, reporter.clone());
        ctx.register_type("any", always()).unwrap();

        let stats = ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        assert_eq!(stats.rejected, 1);
        assert!(ctx.plugins().is_empty());
        assert_eq!(live.load(Ordering::SeqCst), 0);

        let failures = reporter.with_severity(Severity::Failure);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "The plugin bar.mod has no version symbol");
    }

    #[test]
    fn test_missing_version_silent_reports_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "bar.mod", &["symbol=plugin_register"]);
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), reporter.clone());
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(dir.path(), LoadFailureMode::Silent);
        assert!(ctx.plugins().is_empty());
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_open_failure_reports_loader_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_module(dir.path(), "broken.mod", &["fail=invalid ELF header"]);
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), reporter.clone());
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        let failures = reporter.with_severity(Severity::Failure);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].message,
            format!("Couldn't load module {}: invalid ELF header", path.display())
        );

        let silent = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), silent.clone());
        ctx.scan_dir(dir.path(), LoadFailureMode::Silent);
        assert!(silent.is_empty());
    }

    #[test]
    fn test_zero_type_module_is_discarded_and_closed() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "other.mod", &["version=1.0", "symbol=unrelated"]);
        let loader = FakeLoader::new();
        let live = loader.live_handle();
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(loader, reporter.clone());
        ctx.register_type("dissector", PluginType::requires_symbol("plugin_register"))
            .unwrap();

        ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        assert!(ctx.plugins().is_empty());
        assert_eq!(live.load(Ordering::SeqCst), 0);
        assert_eq!(
            reporter.reports()[0].message,
            "The plugin 'other.mod' has no registration routines"
        );
    }

    #[test]
    fn test_no_registered_types_yields_empty_registry() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_module(dir.path(), "foo.mod", &["version=1.0", "symbol=plugin_register"]);
        let mut ctx = context(FakeLoader::new(), Arc::new(MemoryReporter::new()));

        ctx.scan_dir(dir.path(), LoadFailureMode::Silent);
        assert!(ctx.plugins().is_empty());
    }

    #[test]
    fn test_duplicate_across_directories_warns_and_keeps_first() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        write_module(first.path(), "foo.mod", &["version=1.0"]);
        write_module(second.path(), "foo.mod", &["version=2.0"]);
        let loader = FakeLoader::new();
        let opened = loader.opened_handle();
        let live = loader.live_handle();
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(loader, reporter.clone());
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(first.path(), LoadFailureMode::Report);
        ctx.scan_dir(second.path(), LoadFailureMode::Report);

        assert_eq!(ctx.plugins().len(), 1);
        let foo = ctx.plugins().get("foo.mod").unwrap();
        assert_eq!(foo.version(), "1.0");
        assert!(foo.path().starts_with(first.path()));
        assert_eq!(opened.lock().unwrap().len(), 1);
        assert_eq!(live.load(Ordering::SeqCst), 1);

        let warnings = reporter.with_severity(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "The plugin 'foo.mod' was found in multiple directories."
        );
    }

    #[test]
    fn test_subdirectory_with_module_suffix_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("nested.mod")).expect("mkdir");
        let reporter = Arc::new(MemoryReporter::new());
        let mut ctx = context(FakeLoader::new(), reporter.clone());
        ctx.register_type("any", always()).unwrap();

        ctx.scan_dir(dir.path(), LoadFailureMode::Report);
        assert!(reporter.is_empty());
    }
}
