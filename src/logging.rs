use tracing_subscriber::{EnvFilter, fmt};

/// Installs the stderr log sink.
///
/// Default: info for this binary, warn for the MTProto stack. `RUST_LOG`
/// overrides it.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

const DEFAULT_FILTER: &str = "warn,tg_members=info";
