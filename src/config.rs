use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::solana::jupiter::JupiterConfig;
use crate::solana::tokens::constants::{SOL_MINT, USDC_MINT};

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_QUOTE_API_URL: &str = "https://quote-api.jup.ag/v6";

/// Application configuration resolved from the process environment
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub rpc_url: String,
    /// Base58 encoded 64 byte keypair, only needed to sign swaps
    pub private_key: Option<String>,
    pub host: String,
    pub port: u16,
    pub network: String,
    pub quote_api_url: String,

    // Swap defaults
    pub execute_swap: bool,
    pub use_versioned_transaction: bool,
    pub slippage_bps: u16,
    pub max_retries: usize,
    pub swap_amount: String,
    pub input_mint: String,
    pub output_mint: String,
    pub confirm_timeout_secs: u64,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_environment(Environment::default().try_parsing(true))
    }

    pub(crate) fn from_environment(source: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("rpc_url", DEFAULT_RPC_URL)?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("network", "mainnet")?
            .set_default("quote_api_url", DEFAULT_QUOTE_API_URL)?
            .set_default("execute_swap", false)?
            .set_default("use_versioned_transaction", true)?
            .set_default("slippage_bps", 50)?
            .set_default("max_retries", 10)?
            .set_default("swap_amount", "0.01")?
            .set_default("input_mint", SOL_MINT)?
            .set_default("output_mint", USDC_MINT)?
            .set_default("confirm_timeout_secs", 60)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    pub fn jupiter_config(&self) -> JupiterConfig {
        JupiterConfig {
            quote_api_url: self.quote_api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn swap_settings(&self) -> SwapSettings {
        SwapSettings {
            execute_swap: self.execute_swap,
            use_versioned_transaction: self.use_versioned_transaction,
            slippage_bps: self.slippage_bps,
            max_retries: self.max_retries,
        }
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }
}

// Written by hand so the private key never ends up in logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("rpc_url", &self.rpc_url)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("network", &self.network)
            .field("quote_api_url", &self.quote_api_url)
            .field("execute_swap", &self.execute_swap)
            .field("use_versioned_transaction", &self.use_versioned_transaction)
            .field("slippage_bps", &self.slippage_bps)
            .field("max_retries", &self.max_retries)
            .field("swap_amount", &self.swap_amount)
            .field("input_mint", &self.input_mint)
            .field("output_mint", &self.output_mint)
            .field("confirm_timeout_secs", &self.confirm_timeout_secs)
            .finish()
    }
}

/// Transaction encoding requested from the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionEncoding {
    Legacy,
    Versioned,
}

/// Per-orchestrator swap behaviour, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapSettings {
    /// Broadcast the transaction; when false the swap stops after simulation
    pub execute_swap: bool,
    pub use_versioned_transaction: bool,
    pub slippage_bps: u16,
    /// Passed through to the RPC node's `sendTransaction`
    pub max_retries: usize,
}

impl SwapSettings {
    pub fn encoding(&self) -> TransactionEncoding {
        if self.use_versioned_transaction {
            TransactionEncoding::Versioned
        } else {
            TransactionEncoding::Legacy
        }
    }
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self {
            execute_swap: false,
            use_versioned_transaction: true,
            slippage_bps: 50,
            max_retries: 10,
        }
    }
}
