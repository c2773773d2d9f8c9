//! One-shot Jupiter swap: quote, build, simulate and, when enabled, send and confirm.
//!
//! Defaults come from the environment (`.env` supported); flags override them.
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use jupiter_swapper::solana::tokens::{find_token, resolve_mint_decimals};
use jupiter_swapper::{
    create_solana_client, keypair_from_base58, parse_pubkey, AppConfig, ChainClient,
    ServiceContainer, SolanaChainClient, SwapInteractor, SwapOrder, Token,
};
use log::{info, warn};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "Swap tokens through the Jupiter aggregator")]
struct Args {
    /// Amount of the input token, in display units (overrides SWAP_AMOUNT)
    #[arg(long)]
    amount: Option<String>,

    /// Input token mint address (overrides INPUT_MINT)
    #[arg(long)]
    input_mint: Option<String>,

    /// Output token mint address (overrides OUTPUT_MINT)
    #[arg(long)]
    output_mint: Option<String>,

    /// Slippage tolerance in basis points (overrides SLIPPAGE_BPS)
    #[arg(long)]
    slippage_bps: Option<u16>,

    /// Sign and send the transaction instead of only simulating it
    #[arg(long)]
    execute: bool,

    /// Request a legacy transaction instead of a versioned one
    #[arg(long)]
    legacy: bool,

    /// Retries the RPC node may use when forwarding the transaction (overrides MAX_RETRIES)
    #[arg(long)]
    max_retries: Option<usize>,
}

async fn resolve_token(chain: &dyn ChainClient, mint: &str) -> Result<Token> {
    if let Some(token) = find_token(mint) {
        return Ok(token);
    }

    let address = parse_pubkey(mint)?;
    let decimals = resolve_mint_decimals(chain, &address).await?;
    warn!("{} is not in the token catalog, using {} decimals", mint, decimals);

    Ok(Token::unlisted(mint, decimals))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let private_key = config
        .private_key
        .as_deref()
        .ok_or_else(|| anyhow!("PRIVATE_KEY must be set in environment variables to sign swaps"))?;
    let wallet = keypair_from_base58(private_key).context("Invalid PRIVATE_KEY")?;

    let mut settings = config.swap_settings();
    settings.execute_swap |= args.execute;
    if args.legacy {
        settings.use_versioned_transaction = false;
    }
    if let Some(slippage_bps) = args.slippage_bps {
        settings.slippage_bps = slippage_bps;
    }
    if let Some(max_retries) = args.max_retries {
        settings.max_retries = max_retries;
    }

    let chain = Arc::new(SolanaChainClient::new(
        create_solana_client(&config.rpc_url),
        config.confirm_timeout(),
    )) as Arc<dyn ChainClient>;
    info!("RPC: {}", config.rpc_url);

    let amount = args.amount.as_deref().unwrap_or(&config.swap_amount);
    let order = SwapOrder {
        amount: Decimal::from_str(amount.trim())
            .with_context(|| format!("Invalid swap amount: {}", amount))?,
        input: resolve_token(chain.as_ref(), args.input_mint.as_deref().unwrap_or(&config.input_mint)).await?,
        output: resolve_token(chain.as_ref(), args.output_mint.as_deref().unwrap_or(&config.output_mint)).await?,
    };

    let services = ServiceContainer::new(&config, Some(chain));
    let swapper = services
        .swap_interactor(wallet, settings)
        .ok_or_else(|| anyhow!("RPC connection not initialized"))?;

    let outcome = swapper.perform_swap(&order).await?;

    info!(
        "Swap result: {} {} -> {} {} (price impact {}%, {} route leg(s))",
        outcome.input_amount,
        order.input.symbol,
        outcome.output_amount,
        order.output.symbol,
        outcome.price_impact_pct,
        outcome.route_legs
    );
    match &outcome.signature {
        Some(signature) => info!("Solscan: https://solscan.io/tx/{}", signature),
        None => info!("Simulation only; set EXECUTE_SWAP=true or pass --execute to send"),
    }

    Ok(())
}
