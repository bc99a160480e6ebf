//! Loader abstraction: an opened module and the facility that opens one.
//!
//! The engine only consumes this capability. [`NativeLoader`] is the
//! production implementation; tests substitute their own.
//!
//! [`NativeLoader`]: crate::loader::NativeLoader

use std::ffi::c_void;
use std::fmt;
use std::path::Path;
use std::ptr::NonNull;

use crate::error::PluginError;

/// Address of an exported symbol inside an opened module.
///
/// Valid only while the owning [`Module`] is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol(NonNull<c_void>);

impl RawSymbol {
    /// Wraps a non-null symbol address.
    pub fn new(ptr: NonNull<c_void>) -> Self {
        Self(ptr)
    }

    /// Wraps a raw address, returning `None` for null.
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// Returns the raw address.
    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// An opened executable module.
///
/// Dropping the value closes the module.
pub trait Module: Send + Sync + fmt::Debug {
    /// Path the module was opened from.
    fn path(&self) -> &Path;

    /// Resolves an exported symbol.
    fn symbol(&self, name: &str) -> Option<RawSymbol>;

    /// Reads an exported NUL-terminated string variable.
    fn string_symbol(&self, name: &str) -> Option<String>;

    /// Returns whether the module exports `name`.
    fn has_symbol(&self, name: &str) -> bool {
        self.symbol(name).is_some()
    }
}

/// Opens files as executable modules.
pub trait ModuleLoader: Send + Sync {
    /// Opens `path` with local symbol binding.
    fn open(&self, path: &Path) -> Result<Box<dyn Module>, PluginError>;
}
