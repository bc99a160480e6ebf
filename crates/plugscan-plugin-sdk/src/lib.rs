//! # plugscan-plugin-sdk
//!
//! SDK for building native plugins discovered by plugscan.
//!
//! A plugin is a shared library that exports a NUL-terminated `version`
//! string plus at least one registration routine the host recognizes.
//!
//! ```rust,ignore
//! plugscan_plugin_sdk::plugin_version!("0.1.0");
//!
//! #[unsafe(no_mangle)]
//! pub extern "C" fn plugin_register() {}
//! ```

pub mod abi;
pub mod macros;
