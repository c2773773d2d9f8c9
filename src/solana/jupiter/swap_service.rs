use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client as HttpClient;

use crate::entity::SwapperError;
use crate::solana::jupiter::{JupiterConfig, SwapRequest, SwapResponse};

/// Builds ready-to-sign swap transactions for a quote
#[async_trait]
pub trait SwapService: Send + Sync {
    async fn get_swap_transaction(&self, request: &SwapRequest) -> Result<SwapResponse, SwapperError>;
}

/// Swap service backed by the Jupiter swap API
pub struct JupiterSwapService {
    http_client: HttpClient,
    config: JupiterConfig,
}

impl JupiterSwapService {
    pub fn new(http_client: HttpClient, config: JupiterConfig) -> Self {
        Self { http_client, config }
    }
}

#[async_trait]
impl SwapService for JupiterSwapService {
    async fn get_swap_transaction(&self, request: &SwapRequest) -> Result<SwapResponse, SwapperError> {
        let url = format!("{}/swap", self.config.quote_api_url);
        info!("Getting swap transaction from Jupiter...");
        debug!(
            "Requesting swap transaction with user_public_key: {}, legacy: {}",
            request.user_public_key, request.as_legacy_transaction
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to request swap transaction: {}", e);
                SwapperError::BuildFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Jupiter API error [get_swap_transaction]: {} {}", status, error_text);
            return Err(SwapperError::BuildFailed(format!(
                "Jupiter API error {}: {}",
                status, error_text
            )));
        }

        let swap_response = response.json::<SwapResponse>().await.map_err(|e| {
            error!("Failed to parse swap response: {}", e);
            SwapperError::BuildFailed(format!("Failed to parse swap response: {}", e))
        })?;

        info!(
            "Swap transaction received: tx_length={}",
            swap_response.swap_transaction.len()
        );

        Ok(swap_response)
    }
}
