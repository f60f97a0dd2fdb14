//! Tracing and logging setup shared by the stockroom binaries.

/// Initialize process-wide logging with defaults (`info`, JSON).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(&LogSettings::default());
}

/// Initialize process-wide logging from settings.
pub fn init_with(settings: &LogSettings) {
    tracing::init_with(settings);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, LogSettings};
