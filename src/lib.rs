pub mod error;
pub mod models;
pub mod modules;
pub mod proxy; // Lookup relay service
mod utils;

use anyhow::Context;
use modules::logger;
use std::sync::Arc;
use tracing::info;

use crate::modules::oauth::OAuthClient;
use crate::proxy::upstream::client::UpstreamClient;
use crate::proxy::{AxumServer, LookupPipeline, TokenManager};

/// Load config, wire the token manager and pipeline, serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    let env_file = modules::config::load_dotenv()?;
    logger::init_logger(modules::config::log_dir().as_deref());
    if let Some(path) = env_file {
        info!("Loaded environment from {:?}", path);
    }

    let config = modules::load_app_config().context("Failed to load configuration")?;
    info!(
        "Marketplace: {}, API base: {}, timeout: {}s",
        config.marketplace_id, config.api_base, config.request_timeout
    );

    let token_manager = Arc::new(TokenManager::new(Arc::new(OAuthClient::new(&config))));
    let pipeline = Arc::new(LookupPipeline::new(
        token_manager,
        Arc::new(UpstreamClient::new(&config)),
    ));

    let (server, handle) = AxumServer::start(config.get_bind_address(), pipeline)
        .await
        .map_err(anyhow::Error::msg)?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    server.stop();
    handle.await.context("Server task panicked")?;

    Ok(())
}
