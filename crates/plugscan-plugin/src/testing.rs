//! Test doubles for the module loader.
//!
//! `FakeLoader` treats small `key=value` manifest files as modules:
//!
//! ```text
//! version=1.0
//! symbol=plugin_register
//! fail=bad ELF header
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PluginError;
use crate::module::{Module, ModuleLoader, RawSymbol};

#[derive(Debug)]
pub(crate) struct FakeModule {
    path: PathBuf,
    symbols: HashMap<String, String>,
    live: Option<Arc<AtomicUsize>>,
}

impl FakeModule {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            symbols: HashMap::new(),
            live: None,
        }
    }

    pub(crate) fn with_symbol(mut self, name: &str) -> Self {
        self.symbols.insert(name.to_string(), String::new());
        self
    }

    pub(crate) fn with_string(mut self, name: &str, value: &str) -> Self {
        self.symbols.insert(name.to_string(), value.to_string());
        self
    }
}

impl Module for FakeModule {
    fn path(&self) -> &Path {
        &self.path
    }

    fn symbol(&self, name: &str) -> Option<RawSymbol> {
        self.symbols
            .get(name)
            .map(|value| RawSymbol::new(NonNull::from(value.as_str()).cast()))
    }

    fn string_symbol(&self, name: &str) -> Option<String> {
        self.symbols.get(name).cloned()
    }
}

impl Drop for FakeModule {
    fn drop(&mut self) {
        if let Some(live) = &self.live {
            live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeLoader {
    live: Arc<AtomicUsize>,
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Modules opened and not yet dropped.
    pub(crate) fn live_handle(&self) -> Arc<AtomicUsize> {
        self.live.clone()
    }

    /// Every path passed to `open`, in order.
    pub(crate) fn opened_handle(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        self.opened.clone()
    }
}

impl ModuleLoader for FakeLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn Module>, PluginError> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(path.to_path_buf());
        }

        let manifest = std::fs::read_to_string(path).map_err(|e| PluginError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut module = FakeModule::new(path);
        for line in manifest.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            match key {
                "fail" => {
                    return Err(PluginError::LoadFailed {
                        path: path.to_path_buf(),
                        reason: value.to_string(),
                    });
                }
                "version" => module = module.with_string("version", value),
                "symbol" => module = module.with_symbol(value),
                _ => {}
            }
        }

        self.live.fetch_add(1, Ordering::SeqCst);
        module.live = Some(self.live.clone());
        Ok(Box::new(module))
    }
}

/// Writes a fake module manifest into `dir`.
pub(crate) fn write_module(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).expect("write fake module");
    path
}
