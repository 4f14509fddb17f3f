//! Tracing/logging setup shared by binaries and test harnesses.

pub mod config;

/// Subscriber installation (filters, layers).
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(&ObservabilityConfig::from_env());
}

/// Initialize process-wide observability with an explicit config.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with(config: &ObservabilityConfig) -> bool {
    tracing::init_with(config)
}
