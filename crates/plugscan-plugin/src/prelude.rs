//! Convenience re-exports for hosts embedding the engine.

pub use crate::context::{PluginContext, PluginContextBuilder};
pub use crate::describe::PluginDescription;
pub use crate::discovery::plan_directories;
pub use crate::error::PluginError;
pub use crate::loader::NativeLoader;
pub use crate::module::{Module, ModuleLoader, RawSymbol};
pub use crate::paths::{ConfiguredPaths, PathResolver};
pub use crate::privileges::{PrivilegeCheck, ProcessPrivileges};
pub use crate::registry::{Plugin, PluginRegistry};
pub use crate::report::{LoadFailureMode, MemoryReporter, Reporter, TracingReporter};
pub use crate::types::{MAX_PLUGIN_TYPES, PluginType, TypeMask, TypePredicate};
