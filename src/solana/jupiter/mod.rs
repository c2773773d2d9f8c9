// src/solana/jupiter/mod.rs
pub mod config;
pub mod models;
pub mod quote_service;
pub mod swap_service;

pub use models::{
    ComputeUnitPrice, QuoteParams, QuoteResponse, RoutePlan, SwapInfo, SwapMode, SwapRequest,
    SwapResponse,
};

pub use self::config::JupiterConfig;
pub use quote_service::{JupiterQuoteService, QuoteService};
pub use swap_service::{JupiterSwapService, SwapService};
