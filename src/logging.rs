use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout carries nothing but the JSON result.
/// Filtered by `RUST_LOG`, `warn` when unset or unparsable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
