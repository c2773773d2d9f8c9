use reqwest::Client;
use solana_sdk::signature::Keypair;
use std::sync::Arc;

use crate::config::{AppConfig, SwapSettings};
use crate::interactor::{BalanceInteractor, BalanceInteractorImpl, SwapInteractorImpl};
use crate::solana::client::ChainClient;
use crate::solana::jupiter::{
    JupiterConfig, JupiterQuoteService, JupiterSwapService, QuoteService, SwapService,
};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    chain: Option<Arc<dyn ChainClient>>,
    http_client: Client,

    // Interactors
    balance_interactor: Arc<dyn BalanceInteractor>,

    // Configuration
    jupiter_config: JupiterConfig,
    network: String,
    rpc_url: String,
}

impl ServiceContainer {
    /// `chain` is `None` when no RPC connection could be set up; balance lookups then fail
    pub fn new(config: &AppConfig, chain: Option<Arc<dyn ChainClient>>) -> Self {
        let balance_interactor =
            Arc::new(BalanceInteractorImpl::new(chain.clone())) as Arc<dyn BalanceInteractor>;

        Self {
            chain,
            http_client: Client::new(),
            balance_interactor,
            jupiter_config: config.jupiter_config(),
            network: config.network.clone(),
            rpc_url: config.rpc_url.clone(),
        }
    }

    /// Build a swap orchestrator signing with `wallet`. Quote and build share one HTTP client.
    pub fn swap_interactor(&self, wallet: Keypair, settings: SwapSettings) -> Option<SwapInteractorImpl> {
        let chain = self.chain.clone()?;

        let quote_service = Arc::new(JupiterQuoteService::new(
            self.http_client.clone(),
            self.jupiter_config.clone(),
        )) as Arc<dyn QuoteService>;
        let swap_service = Arc::new(JupiterSwapService::new(
            self.http_client.clone(),
            self.jupiter_config.clone(),
        )) as Arc<dyn SwapService>;

        Some(SwapInteractorImpl::new(
            quote_service,
            swap_service,
            chain,
            wallet,
            settings,
        ))
    }

    // Accessor methods

    pub fn chain(&self) -> Option<Arc<dyn ChainClient>> {
        self.chain.clone()
    }

    pub fn balance_interactor(&self) -> Arc<dyn BalanceInteractor> {
        self.balance_interactor.clone()
    }

    pub fn jupiter_config(&self) -> JupiterConfig {
        self.jupiter_config.clone()
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::client::mock::MockChainClient;
    use config::Environment;

    fn config() -> AppConfig {
        AppConfig::from_environment(Environment::default().source(Some(config::Map::new()))).unwrap()
    }

    #[test]
    fn test_swaps_need_a_chain_connection() {
        let services = ServiceContainer::new(&config(), None);
        assert!(services.chain().is_none());
        assert!(services
            .swap_interactor(Keypair::new(), SwapSettings::default())
            .is_none());
    }

    #[test]
    fn test_swap_interactor_carries_settings() {
        let chain = Arc::new(MockChainClient::new()) as Arc<dyn ChainClient>;
        let services = ServiceContainer::new(&config(), Some(chain));
        let settings = SwapSettings {
            execute_swap: true,
            ..SwapSettings::default()
        };

        let swapper = services.swap_interactor(Keypair::new(), settings).unwrap();
        assert_eq!(swapper.settings(), &settings);
        assert_eq!(services.network(), "mainnet");
        assert_eq!(
            services.jupiter_config().quote_api_url,
            crate::config::DEFAULT_QUOTE_API_URL
        );
    }
}
