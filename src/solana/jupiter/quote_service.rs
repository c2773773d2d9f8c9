use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;

use crate::entity::SwapperError;
use crate::solana::jupiter::{JupiterConfig, QuoteParams, QuoteResponse};

/// Source of swap route quotes
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Get a route quote for swapping `params.amount` smallest units
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse, SwapperError>;
}

/// Quote service backed by the Jupiter quote API
pub struct JupiterQuoteService {
    http_client: Client,
    config: JupiterConfig,
}

impl JupiterQuoteService {
    pub fn new(http_client: Client, config: JupiterConfig) -> Self {
        Self { http_client, config }
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse, SwapperError> {
        let url = format!("{}/quote", self.config.quote_api_url);
        info!("Getting Jupiter quote for {} units...", params.amount);
        debug!("Requesting quote from {} with parameters: {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .query(&params.to_query())
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch quote from Jupiter API: {}", e);
                SwapperError::QuoteUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Jupiter API error [get_quote]: {} {}", status, error_text);
            return Err(SwapperError::QuoteUnavailable(format!(
                "Jupiter API error {}: {}",
                status, error_text
            )));
        }

        let quote = response.json::<QuoteResponse>().await.map_err(|e| {
            error!("Failed to parse quote response: {}", e);
            SwapperError::QuoteUnavailable(format!("Failed to parse quote response: {}", e))
        })?;

        // Reject quotes whose amounts we could not report on later
        quote.in_amount_units()?;
        quote.out_amount_units()?;

        info!(
            "Jupiter quote received: input_amount={}, output_amount={}, price_impact={}%, routes={}",
            quote.in_amount,
            quote.out_amount,
            quote.price_impact_pct,
            quote.route_plan.len()
        );

        Ok(quote)
    }
}
