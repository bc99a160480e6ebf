//! # plugscan-core
//!
//! Core crate for plugscan. Contains the configuration schemas and the
//! unified error system shared by the plugin engine and the CLI.
//!
//! This crate has **no** internal dependencies on other plugscan crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
