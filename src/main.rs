// Standard library
use std::sync::Arc;

// 3rd party crates
use tokio::signal::ctrl_c;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project modules
mod apply;
mod extattrs;
mod functions;
mod nios;
mod records;
mod resources;
mod settings;

// Project imports
use crate::functions::run;
use crate::settings::types::ConfigManager;

/// Main entry point.
///
/// Reads the desired response policy zone records from configuration and
/// applies them to an Infoblox NIOS grid master, either once or on a fixed
/// interval.
#[tokio::main]
async fn main() {
    // loads the .env file from the current directory or parents.
    dotenvy::dotenv_override().ok();

    let config: Arc<ConfigManager> = match ConfigManager::new().await {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to initialize configuration: {}", e);
            std::process::exit(2);
        }
    };

    // setup logging.
    let log_level: String = config.get_log_level().await;

    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(format!(
            "{},hyper_util=error,hyper=error,reqwest=error,rustls=error",
            log_level
        ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();

    info!("⚙️ Settings have been loaded.");

    // Create a broadcast channel for shutdown signal
    let (shutdown_tx, _) = broadcast::channel(1);
    let shutdown_tx_clone = shutdown_tx.clone();

    // Handle Ctrl+C
    tokio::spawn(async move {
        if let Err(e) = ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, initiating graceful shutdown...");
        let _ = shutdown_tx_clone.send(());
    });

    // Run the main application logic with shutdown signal
    if let Err(e) = run(config, shutdown_tx.subscribe()).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }

    info!("Shutdown complete.");
}
