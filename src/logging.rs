use tracing_subscriber::EnvFilter;

/// Initialise logging at `info`, or at `debug` when the config asks for it.
/// Only in debug mode may `RUST_LOG` override the level.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
