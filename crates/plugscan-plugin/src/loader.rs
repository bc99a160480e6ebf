//! Native module loader backed by `libloading`.

use std::ffi::c_void;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PluginError;
use crate::ffi::safety::{c_str_to_string, symbol_name};
use crate::module::{Module, ModuleLoader, RawSymbol};

/// Opens shared libraries (.so / .dll / .dylib) with the platform loader.
///
/// On Unix the library is opened with `RTLD_LAZY | RTLD_LOCAL`, so a
/// plugin's symbols never enter the global namespace where they could
/// collide with another plugin's.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLoader;

impl NativeLoader {
    /// Creates a native loader.
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn open_library(path: &Path) -> Result<libloading::Library, libloading::Error> {
        use libloading::os::unix::{Library, RTLD_LAZY, RTLD_LOCAL};

        // SAFETY: loading runs the library's initializers. Only files placed
        // in plugin directories are opened, which the host trusts.
        let lib = unsafe { Library::open(Some(path), RTLD_LAZY | RTLD_LOCAL)? };
        Ok(lib.into())
    }

    #[cfg(not(unix))]
    fn open_library(path: &Path) -> Result<libloading::Library, libloading::Error> {
        // SAFETY: see the Unix variant.
        unsafe { libloading::Library::new(path) }
    }
}

impl ModuleLoader for NativeLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn Module>, PluginError> {
        let library = Self::open_library(path).map_err(|e| PluginError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "Native module opened");

        Ok(Box::new(NativeModule {
            path: path.to_path_buf(),
            library,
        }))
    }
}

/// A shared library opened by [`NativeLoader`].
///
/// The library stays mapped until this value is dropped.
#[derive(Debug)]
pub struct NativeModule {
    /// File the library was opened from.
    path: PathBuf,
    /// Loaded library handle.
    library: libloading::Library,
}

impl Module for NativeModule {
    fn path(&self) -> &Path {
        &self.path
    }

    fn symbol(&self, name: &str) -> Option<RawSymbol> {
        let name = symbol_name(name)?;
        // SAFETY: the symbol is only exposed as an opaque address; it is
        // never called or dereferenced here.
        let sym = unsafe {
            self.library
                .get::<*mut c_void>(name.as_bytes_with_nul())
                .ok()?
        };
        RawSymbol::from_ptr(*sym)
    }

    fn string_symbol(&self, name: &str) -> Option<String> {
        let name = symbol_name(name)?;
        // SAFETY: by plugin ABI contract the symbol is a NUL-terminated
        // character array that lives as long as the library.
        unsafe {
            let sym = self
                .library
                .get::<*const c_char>(name.as_bytes_with_nul())
                .ok()?;
            c_str_to_string(*sym)
        }
    }
}
