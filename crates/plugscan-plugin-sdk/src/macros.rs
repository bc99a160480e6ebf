//! Export macros for plugin crates.

/// Exports the `version` symbol the host requires from every plugin.
///
/// # Example
/// ```rust,ignore
/// plugscan_plugin_sdk::plugin_version!("1.0.0");
/// ```
#[macro_export]
macro_rules! plugin_version {
    ($version:literal) => {
        const __PLUGSCAN_VERSION: &str = concat!($version, "\0");

        #[unsafe(no_mangle)]
        #[allow(non_upper_case_globals)]
        pub static version: [u8; __PLUGSCAN_VERSION.len()] =
            $crate::abi::nul_terminated::<{ __PLUGSCAN_VERSION.len() }>(__PLUGSCAN_VERSION);
    };
}
