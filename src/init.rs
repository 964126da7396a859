//! Initialization helpers for the application startup.

/// Sets up the tracing subscriber. `RUST_LOG` wins when set; otherwise the
/// level resolved from the CLI flags and config applies.
pub fn setup_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
