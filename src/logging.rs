//! Log setup for the binary. Output goes to stderr so stdout stays pure JSON.
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise `default_level` applies to everything.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // a second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
