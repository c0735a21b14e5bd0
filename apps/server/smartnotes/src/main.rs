use smartnotes::app;
use smartnotes::error::SmartnotesError;
use smartnotes::logger::initialize as LoggerInitialize;

use relay_core::config::SmartnotesPaths;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SmartnotesError> {
    let paths = SmartnotesPaths::detect();

    create_dir_all(&paths.log_dir).map_err(|e| SmartnotesError::Smartnotes {
        message: format!("Failed to create log directory: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&paths.log_dir)?;

    info!("SmartNotes relay starting");
    info!(
        "Config directory: {} ({})",
        paths.config_dir.display(),
        paths.config_source
    );
    info!(
        "Log directory: {} ({})",
        paths.log_dir.display(),
        paths.log_source
    );

    let running = app::start(&paths.config_dir).await?;
    info!(
        "Serving editor from {} at {}",
        running.config.server.static_dir,
        running.handle.base_url()
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| SmartnotesError::Smartnotes {
            message: format!("Failed to listen for Ctrl-C: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!("Shutdown requested");
    running.handle.shutdown().await?;
    Ok(())
}
