use serde::{Deserialize, Serialize};

/// Native SOL balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBalance {
    pub balance: String,
    pub lamports: u64,
}

/// SPL token balance for a single mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub balance: String,
    pub mint: String,
}
