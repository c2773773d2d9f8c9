use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub mint: String,   // Token mint address
    pub symbol: String, // Token symbol (e.g. "SOL", "USDC")
    pub name: String,
    pub decimals: u8, // Number of decimal places
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
}

impl Token {
    /// Token known only by mint and decimals, e.g. one resolved from chain state
    pub fn unlisted(mint: &str, decimals: u8) -> Self {
        Self {
            mint: mint.to_string(),
            symbol: "Unknown".to_string(),
            name: "Unknown".to_string(),
            decimals,
            logo_uri: String::new(),
        }
    }
}
