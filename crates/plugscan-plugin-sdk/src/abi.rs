//! On-disk ABI shared between plugins and the host.
//!
//! Only symbol *names* are fixed here. The host never calls into a plugin
//! while discovering it; category owners decide what a symbol means.

/// Exported NUL-terminated string every plugin must provide.
pub const VERSION_SYMBOL: &str = "version";

/// Registration routine exported by protocol dissector plugins.
pub const DISSECTOR_REGISTER_SYMBOL: &str = "plugin_register";

/// Registration routine exported by capture file type plugins.
pub const FILE_TYPE_REGISTER_SYMBOL: &str = "register_wtap_module";

/// Registration routine exported by codec plugins.
pub const CODEC_REGISTER_SYMBOL: &str = "register_codec";

/// Copies `s` into a fixed-size byte array.
///
/// `N` must equal `s.len()`; [`plugin_version!`](crate::plugin_version)
/// passes a string that already ends in `\0`.
pub const fn nul_terminated<const N: usize>(s: &str) -> [u8; N] {
    let bytes = s.as_bytes();
    assert!(bytes.len() == N, "length mismatch");
    assert!(N > 0 && bytes[N - 1] == 0, "missing NUL terminator");

    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = bytes[i];
        i += 1;
    }
    out
}
