use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Binaries only; the library never installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
