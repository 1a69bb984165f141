//! Tracing/logging setup shared by binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat, ParseLogFormatError};

/// Initialize process-wide logging with defaults (`RUST_LOG` or `info`, text output).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(&LogConfig::default());
}

/// Initialize process-wide logging with an explicit configuration.
pub fn init_with(config: &LogConfig) {
    self::tracing::init(config);
}
