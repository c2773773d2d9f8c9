// Re-export everything from submodules
pub mod client;
pub mod jupiter;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::{create_solana_client, ChainClient, SimulationReport, SolanaChainClient};
pub use tokens::constants::{RAY_MINT, SOL_MINT, USDC_MINT, USDT_MINT};
pub use tokens::SwapTransaction;
pub use wallet::{keypair_from_base58, parse_pubkey};
