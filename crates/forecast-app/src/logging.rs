//! Logging setup

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging
///
/// Logs go to stderr so they never interleave with the form on stdout.
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
