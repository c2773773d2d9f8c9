use async_trait::async_trait;
use log::{debug, error, info};
use solana_sdk::signature::{Keypair, Signer};
use std::sync::Arc;

use crate::config::SwapSettings;
use crate::entity::{SwapOrder, SwapOutcome, SwapperError};
use crate::solana::client::ChainClient;
use crate::solana::jupiter::{QuoteParams, QuoteResponse, QuoteService, SwapRequest, SwapService};
use crate::solana::tokens::SwapTransaction;
use crate::solana::utils::{from_base_units, to_base_units};
use crate::solana::wallet::parse_pubkey;

/// Number of trailing simulation log lines written on success
const SIMULATION_LOG_TAIL: usize = 3;

#[async_trait]
pub trait SwapInteractor: Send + Sync {
    /// Quote, build, simulate and, when enabled, sign, send and confirm a swap
    async fn perform_swap(&self, order: &SwapOrder) -> Result<SwapOutcome, SwapperError>;
}

pub struct SwapInteractorImpl {
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,
    chain: Arc<dyn ChainClient>,
    wallet: Keypair,
    settings: SwapSettings,
}

impl SwapInteractorImpl {
    pub fn new(
        quote_service: Arc<dyn QuoteService>,
        swap_service: Arc<dyn SwapService>,
        chain: Arc<dyn ChainClient>,
        wallet: Keypair,
        settings: SwapSettings,
    ) -> Self {
        Self {
            quote_service,
            swap_service,
            chain,
            wallet,
            settings,
        }
    }

    pub fn settings(&self) -> &SwapSettings {
        &self.settings
    }

    async fn quote(&self, order: &SwapOrder) -> Result<QuoteResponse, SwapperError> {
        let input_mint = parse_pubkey(&order.input.mint)?;
        let output_mint = parse_pubkey(&order.output.mint)?;
        let amount = to_base_units(order.amount, order.input.decimals)?;

        info!(
            "Swapping {} {} ({} units) for {}",
            order.amount, order.input.symbol, amount, order.output.symbol
        );

        let params = QuoteParams {
            input_mint: input_mint.to_string(),
            output_mint: output_mint.to_string(),
            amount,
            slippage_bps: self.settings.slippage_bps,
            only_direct_routes: false,
            as_legacy_transaction: !self.settings.use_versioned_transaction,
            ..QuoteParams::default()
        };

        self.quote_service.get_quote(&params).await
    }

    async fn build(&self, quote: QuoteResponse) -> Result<SwapTransaction, SwapperError> {
        let encoding = self.settings.encoding();
        let request = SwapRequest::new(quote, &self.wallet.pubkey(), encoding);
        let response = self.swap_service.get_swap_transaction(&request).await?;
        debug!(
            "Swap transaction built: last_valid_block_height={:?}, prioritization_fee_lamports={:?}",
            response.last_valid_block_height, response.prioritization_fee_lamports
        );

        SwapTransaction::from_base64(&response.swap_transaction, encoding)
    }

    async fn simulate(&self, transaction: &SwapTransaction) -> Result<(), SwapperError> {
        info!("Simulating transaction...");
        let report = self.chain.simulate_transaction(transaction).await?;

        let tail = report.logs.len().saturating_sub(SIMULATION_LOG_TAIL);
        info!(
            "Simulation successful: units_consumed={:?}, logs={:?}",
            report.units_consumed,
            &report.logs[tail..]
        );
        Ok(())
    }

    async fn sign_and_send(&self, transaction: SwapTransaction) -> Result<String, SwapperError> {
        info!("Sending transaction...");
        let signed = transaction.sign(&self.wallet)?;
        let signature = self
            .chain
            .send_transaction(&signed, self.settings.max_retries)
            .await?;
        info!("Transaction sent: {}", signature);

        self.chain.confirm_transaction(&signature).await?;
        info!("Transaction confirmed: {}", signature);

        Ok(signature.to_string())
    }

    async fn run(&self, order: &SwapOrder) -> Result<SwapOutcome, SwapperError> {
        let quote = self.quote(order).await?;
        let input_amount = from_base_units(quote.in_amount_units()?, order.input.decimals)?;
        let output_amount = from_base_units(quote.out_amount_units()?, order.output.decimals)?;
        let price_impact_pct = quote.price_impact_pct.clone();
        let route_legs = quote.route_plan.len();

        info!(
            "Quote details: input={} {}, output={} {}, price_impact={}%, routes={}",
            input_amount,
            order.input.symbol,
            output_amount,
            order.output.symbol,
            price_impact_pct,
            route_legs
        );

        let transaction = self.build(quote).await?;
        self.simulate(&transaction).await?;

        let signature = if self.settings.execute_swap {
            Some(self.sign_and_send(transaction).await?)
        } else {
            info!("Swap simulation completed; execution is disabled");
            None
        };

        Ok(SwapOutcome {
            input_amount: input_amount.normalize(),
            output_amount: output_amount.normalize(),
            price_impact_pct,
            route_legs,
            signature,
        })
    }
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    async fn perform_swap(&self, order: &SwapOrder) -> Result<SwapOutcome, SwapperError> {
        info!("Starting Jupiter swap with wallet {}", self.wallet.pubkey());
        debug!("Swap settings: {:?}", self.settings);

        let result = self.run(order).await;
        if let Err(e) = &result {
            match e.stage() {
                Some(stage) => error!("Swap failed at {} stage: {}", stage, e),
                None => error!("Swap failed: {}", e),
            }
        }

        result
    }
}
