use serde::Serialize;
use std::collections::BTreeMap;

use crate::entity::{NativeBalance, Token, TokenBalance};

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub balance: String,
    pub lamports: u64,
}

impl From<NativeBalance> for BalanceResponse {
    fn from(balance: NativeBalance) -> Self {
        Self {
            success: true,
            balance: balance.balance,
            lamports: balance.lamports,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenBalanceResponse {
    pub success: bool,
    pub balance: String,
    pub mint: String,
}

impl From<TokenBalance> for TokenBalanceResponse {
    fn from(balance: TokenBalance) -> Self {
        Self {
            success: true,
            balance: balance.balance,
            mint: balance.mint,
        }
    }
}

/// Token catalog keyed by symbol
#[derive(Debug, Serialize)]
pub struct TokensResponse {
    pub success: bool,
    pub tokens: BTreeMap<String, Token>,
}

impl From<Vec<Token>> for TokensResponse {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            success: true,
            tokens: tokens
                .into_iter()
                .map(|token| (token.symbol.clone(), token))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub network: String,
    pub rpc: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
