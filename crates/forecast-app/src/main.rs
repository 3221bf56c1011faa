//! Hospitalization Forecast - Main Entry Point

use anyhow::Context;
use forecast_app::{init_logging, run_app, AppConfig, AppError, TerminalSurface};
use std::io;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.log_level)?;

    info!("=== Hospitalization Forecast v{} ===", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut surface = TerminalSurface::new(stdin.lock(), io::stdout());

    match run_app(&config, &mut surface) {
        Ok(()) => Ok(()),
        Err(AppError::Startup(e)) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
