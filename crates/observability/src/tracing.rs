//! Tracing/logging initialization for directory processes.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Target of the directory crate's events.
pub const DIRECTORY_TARGET: &str = "usergroups_directory";

/// Filter used when `RUST_LOG` is not set: directory events at `info`,
/// everything else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,usergroups_directory=info";

/// Filter directive that raises directory events to `level` and keeps other
/// targets at `warn`.
pub fn directory_filter(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    format!("warn,{DIRECTORY_TARGET}={level}")
}

/// Install a JSON fmt subscriber filtered by `RUST_LOG`.
///
/// Membership events are flattened so `user`, `group` and `removed` sit at
/// the top level of each record, next to the fields of the enclosing
/// operation span.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
