use crate::entity::Token;

// Known token information
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
pub const RAY_MINT: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";

// Define token decimals
pub const SOL_DECIMALS: u8 = 9;
pub const USDC_DECIMALS: u8 = 6;
pub const USDT_DECIMALS: u8 = 6;
pub const RAY_DECIMALS: u8 = 6;

/// Used when neither the catalog nor the mint account gives a decimal count
pub const DEFAULT_TOKEN_DECIMALS: u8 = 6;

const LOGO_BASE: &str =
    "https://raw.githubusercontent.com/solana-labs/token-list/main/assets/mainnet";

// (mint, symbol, name, decimals, logo file)
const KNOWN_TOKENS: [(&str, &str, &str, u8, &str); 4] = [
    (SOL_MINT, "SOL", "Solana", SOL_DECIMALS, "logo.png"),
    (USDC_MINT, "USDC", "USD Coin", USDC_DECIMALS, "logo.png"),
    (RAY_MINT, "RAY", "Raydium", RAY_DECIMALS, "logo.png"),
    (USDT_MINT, "USDT", "Tether USD", USDT_DECIMALS, "logo.svg"),
];

/// Static catalog of tokens the service knows about
pub fn known_tokens() -> Vec<Token> {
    KNOWN_TOKENS
        .iter()
        .map(|(mint, symbol, name, decimals, logo)| Token {
            mint: mint.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals: *decimals,
            logo_uri: format!("{}/{}/{}", LOGO_BASE, mint, logo),
        })
        .collect()
}

/// Look up a catalog token by mint address
pub fn find_token(mint: &str) -> Option<Token> {
    known_tokens().into_iter().find(|token| token.mint == mint)
}
