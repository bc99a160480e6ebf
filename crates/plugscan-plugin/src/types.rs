//! Plugin type registry: the open set of categories the host recognizes.
//!
//! Each category gets a bit in a 32-bit [`TypeMask`]. A plugin's mask
//! records which category predicates accepted it.

use std::fmt;

use crate::error::PluginError;
use crate::module::Module;

/// Maximum number of plugin types; one per bit of [`TypeMask`].
pub const MAX_PLUGIN_TYPES: usize = 32;

/// Capability check deciding whether a loaded module implements a type.
pub type TypePredicate = Box<dyn Fn(&dyn Module) -> bool + Send + Sync>;

/// Bit-per-type summary of the categories a plugin satisfies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeMask(u32);

impl TypeMask {
    /// An empty mask.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Sets the bit for `bit_index`.
    pub fn set(&mut self, bit_index: u8) {
        debug_assert!((bit_index as usize) < MAX_PLUGIN_TYPES);
        self.0 |= 1 << bit_index;
    }

    /// Returns whether the bit for `bit_index` is set.
    pub fn contains(self, bit_index: u8) -> bool {
        (bit_index as usize) < MAX_PLUGIN_TYPES && self.0 & (1 << bit_index) != 0
    }

    /// Returns whether no bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A registered plugin category.
pub struct PluginType {
    /// Category label, e.g. `"dissector"`.
    name: String,
    /// Bit position in [`TypeMask`].
    bit_index: u8,
    /// Capability check.
    predicate: TypePredicate,
}

impl PluginType {
    /// Category label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bit position assigned at registration.
    pub fn bit_index(&self) -> u8 {
        self.bit_index
    }

    /// Runs the predicate against `module`.
    pub fn matches(&self, module: &dyn Module) -> bool {
        (self.predicate)(module)
    }

    /// Predicate accepting modules that export `symbol`.
    pub fn requires_symbol(symbol: impl Into<String>) -> TypePredicate {
        let symbol = symbol.into();
        Box::new(move |module: &dyn Module| module.has_symbol(&symbol))
    }
}

impl fmt::Debug for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginType")
            .field("name", &self.name)
            .field("bit_index", &self.bit_index)
            .finish_non_exhaustive()
    }
}

/// Append-only, insertion-ordered set of plugin types.
#[derive(Debug, Default)]
pub struct PluginTypeRegistry {
    types: Vec<PluginType>,
}

impl PluginTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type and returns its bit index.
    ///
    /// Indexes are handed out in registration order starting at 0. Once
    /// [`MAX_PLUGIN_TYPES`] types exist, further registrations fail and
    /// leave the registry unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        predicate: TypePredicate,
    ) -> Result<u8, PluginError> {
        let name = name.into();
        if self.types.len() >= MAX_PLUGIN_TYPES {
            return Err(PluginError::TypeLimitExceeded {
                name,
                limit: MAX_PLUGIN_TYPES,
            });
        }

        let bit_index = self.types.len() as u8;
        self.types.push(PluginType {
            name,
            bit_index,
            predicate,
        });
        Ok(bit_index)
    }

    /// Runs every predicate against `module` and collects the matches.
    pub fn classify(&self, module: &dyn Module) -> TypeMask {
        let mut mask = TypeMask::empty();
        for ty in &self.types {
            if ty.matches(module) {
                mask.set(ty.bit_index);
            }
        }
        mask
    }

    /// Names of the types in `mask`, in registration order.
    pub fn names(&self, mask: TypeMask) -> Vec<&str> {
        self.types
            .iter()
            .filter(|ty| mask.contains(ty.bit_index))
            .map(|ty| ty.name.as_str())
            .collect()
    }

    /// Comma-joined list of the type names in `mask`.
    pub fn describe(&self, mask: TypeMask) -> String {
        self.names(mask).join(", ")
    }

    /// Looks up a type by name.
    pub fn get(&self, name: &str) -> Option<&PluginType> {
        self.types.iter().find(|ty| ty.name == name)
    }

    /// Iterates types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginType> {
        self.types.iter()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Drops every type. Only used during shutdown.
    pub(crate) fn clear(&mut self) {
        self.types.clear();
    }
}
