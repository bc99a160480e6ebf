//! Minimal dissector plugin.
//!
//! Build it with `cargo build -p plugin-hello` and point
//! `plugins.directory` at the target directory (with `build_layout = true`)
//! to see it listed by `plugscan list`.

use std::sync::atomic::{AtomicUsize, Ordering};

plugscan_plugin_sdk::plugin_version!("0.1.0");

static REGISTERED: AtomicUsize = AtomicUsize::new(0);

/// Dissector registration entry point. Its presence alone classifies this
/// module as a dissector.
#[unsafe(no_mangle)]
pub extern "C" fn plugin_register() {
    REGISTERED.fetch_add(1, Ordering::Relaxed);
}

/// Number of times the host called [`plugin_register`].
pub fn registration_count() -> usize {
    REGISTERED.load(Ordering::Relaxed)
}
