//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber.
///
/// `level` seeds the default filter (e.g. `"info"`); the `RUST_LOG`
/// environment variable overrides it when set. With `json` the formatter
/// emits one JSON object per line instead of human-readable output.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
