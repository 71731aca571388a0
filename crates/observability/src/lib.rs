//! Tracing/logging (shared setup).

/// Initialize process-wide tracing with the format named by the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use tracing::{ENV_LOG_FORMAT, LogFormat, LogFormatError};
