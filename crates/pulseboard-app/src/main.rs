//! # Pulseboard
//!
//! Runs a dashboard session against the configured data client: loads
//! users and metrics, then walks a user through add, select, update and
//! delete while logging every published snapshot.

use pulseboard_client::create_data_client;
use pulseboard_config::{AppConfig, ConfigLoader};
use pulseboard_core::telemetry::init_telemetry;
use pulseboard_core::DashboardResult;
use pulseboard_store::DashboardStore;
use std::sync::Arc;
use tracing::{error, info};

mod session;

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting {}...", config.app.name);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> DashboardResult<()> {
    info!("Environment: {}", config.app.environment);
    info!("Client mode: {}", config.client.mode);

    let client = create_data_client(&config)?;
    let store = Arc::new(DashboardStore::new(client));

    let watcher = session::spawn_snapshot_logger(&store);
    let result = session::run_session(&store).await;
    watcher.abort();

    session::log_summary(&store.snapshot());
    result
}
