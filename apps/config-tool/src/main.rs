// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use config_tool::cli::Cli;
use config_tool::error::ConfigToolError;
use config_tool::logger::initialize as LoggerInitialize;

use config_core::error::CoreError;
use config_core::launch::LaunchBridge;
use config_core::paths::{AppPaths, AssetPaths};
use config_core::server::{ServerOptions, start_config_server};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;

use clap::Parser;
use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ConfigToolError> {
    let cli = Cli::parse();
    let page = cli.launch_page();

    let paths = AppPaths::detect().map_err(CoreError::from)?;

    // The log file lives next to the bootstrap pages
    create_dir_all(&paths.local_data_dir).map_err(|e| ConfigToolError::Tool {
        message: format!("Failed to create {}: {e}", paths.local_data_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    LoggerInitialize(&paths.local_data_dir)?;

    info!("McTabim config tool starting ({page} page)");

    let assets = AssetPaths::beside_executable().map_err(CoreError::from)?;
    let bridge = LaunchBridge::new(&paths.local_data_dir);

    let handle = start_config_server(ServerOptions::new(paths, assets))
        .await
        .map_err(CoreError::from)?;

    if let Err(e) = bridge.launch(handle.port(), page, handle.session_token()) {
        error!("Failed to open the browser: {e}");
        handle.quit();
        handle.wait().await.map_err(CoreError::from)?;
        return Err(CoreError::from(e).into());
    }

    handle.wait().await.map_err(CoreError::from)?;

    info!("McTabim config tool exiting");
    Ok(())
}
