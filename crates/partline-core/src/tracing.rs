use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize JSON tracing to stdout for a Partline service binary.
/// Filtering comes from `RUST_LOG`; call from `main` before the database
/// connect so connection failures are captured too.
///
/// Repeated calls after the first are silently ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json())
        .try_init();
}
