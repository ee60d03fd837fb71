//! Client selection at process start.

use crate::{DataClient, HttpDataClient, InMemoryDataClient};
use pulseboard_config::{AppConfig, ClientMode};
use pulseboard_core::DashboardResult;
use std::sync::Arc;
use tracing::info;

/// Builds the data client named by `config.client.mode`.
///
/// Called once during startup; the returned client is injected into the
/// store and never swapped afterwards.
pub fn create_data_client(config: &AppConfig) -> DashboardResult<Arc<dyn DataClient>> {
    let client: Arc<dyn DataClient> = match config.client.mode {
        ClientMode::Mock => Arc::new(InMemoryDataClient::from_config(&config.client)),
        ClientMode::Http => Arc::new(HttpDataClient::from_config(config)?),
    };

    info!(
        "Using {} data client{}",
        client.name(),
        if config.client.mode.is_network() {
            format!(" at {}", config.client.base_url)
        } else {
            String::new()
        }
    );

    Ok(client)
}
