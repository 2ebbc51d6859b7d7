use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_level` applies when it is unset or
/// invalid. Calling this twice is harmless: the second call leaves the
/// existing subscriber in place.
///
/// ```ignore
/// console_core::logging::init_tracing("info");
/// tracing::info!("console started");
/// ```
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
