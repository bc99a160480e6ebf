//! FFI helpers for reading data out of native modules.

pub mod safety;
