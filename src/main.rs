//! Jupiter Swapper - balance API server
//!
//! Serves wallet SOL and SPL token balances, the token catalog and a health
//! check over HTTP.
use anyhow::Context;
use dotenv::dotenv;
use jupiter_swapper::{create_router, create_solana_client, AppConfig, ChainClient, ServiceContainer, SolanaChainClient};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Jupiter Swapper v{}", jupiter_swapper::VERSION);

    let config = AppConfig::load().context("Failed to load configuration")?;

    // A bad RPC URL leaves the server up; balance requests then answer with an error
    info!("Connecting to Solana network...");
    let chain = match reqwest::Url::parse(&config.rpc_url) {
        Ok(_) => {
            let client = SolanaChainClient::new(
                create_solana_client(&config.rpc_url),
                config.confirm_timeout(),
            );
            Some(Arc::new(client) as Arc<dyn ChainClient>)
        }
        Err(e) => {
            error!("Invalid RPC_URL {}: {}", config.rpc_url, e);
            None
        }
    };

    let services = Arc::new(ServiceContainer::new(&config, chain));
    let app = create_router(services);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{} ({})", addr, config.network);
    info!("RPC: {}", config.rpc_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Received shutdown signal, stopping server...");
        })
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
