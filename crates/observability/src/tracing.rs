//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ObservabilityConfig};

/// Install the global `fmt` subscriber described by `config`.
///
/// `RUST_LOG` wins over `config.default_filter`. Returns `false` if a global
/// subscriber is already set; the existing one is left untouched.
pub fn init_with(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(config.with_target);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_a_no_op() {
        let config = ObservabilityConfig::default().with_default_filter("not a [valid filter");
        let _ = init_with(&config);

        assert!(!init_with(&ObservabilityConfig::default()));
        crate::init();
        ::tracing::info!("still logging");
    }
}
