use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber
///
/// Logs go to stderr so stdout only carries the sync report. The level comes
/// from `RUST_LOG`, defaulting to "warn".
pub fn init() -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
