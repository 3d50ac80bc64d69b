//! Tracing/logging setup shared by binaries and tests.

/// Initialize process-wide tracing with the default filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Initialize process-wide tracing, falling back to `default_filter` when
/// `RUST_LOG` is unset or invalid.
pub fn init_with(default_filter: &str) {
    tracing::init(default_filter);
}

/// Initialize process-wide tracing with directory events at `level`.
pub fn init_directory(level: tracing_subscriber::filter::LevelFilter) {
    tracing::init(&tracing::directory_filter(level));
}

/// Tracing configuration (filters, layers).
pub mod tracing;
