//! Tracing/logging setup shared by binaries and hosts.

/// Initialize process-wide logging with the `info` default.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}

/// Same as [`init`], with an explicit default directive.
///
/// `RUST_LOG` still wins when it is set and parses.
pub fn init_with_filter(default_directive: &str) {
    tracing::init(default_directive);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
