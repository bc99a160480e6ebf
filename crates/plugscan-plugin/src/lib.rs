//! # plugscan-plugin
//!
//! Plugin discovery engine. Provides:
//!
//! - A type registry of host plugin categories, each a bit in a 32-bit mask
//! - Native module loading via `libloading` with local symbol binding
//! - A directory scanner that validates and classifies candidate modules
//! - A plugin registry that owns every loaded module until cleanup
//! - A run-once discovery pass over build, system and personal directories
//! - Diagnostics listing each plugin's name, version, types and path

pub mod context;
pub mod describe;
pub mod discovery;
pub mod error;
pub mod ffi;
pub mod loader;
pub mod module;
pub mod paths;
pub mod prelude;
pub mod privileges;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use context::PluginContext;
pub use describe::PluginDescription;
pub use error::PluginError;
pub use registry::{Plugin, PluginRegistry};
pub use report::LoadFailureMode;
pub use types::{PluginType, PluginTypeRegistry, TypeMask};
