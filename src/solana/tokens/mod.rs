// Re-export submodules
pub mod constants;
pub mod native;
pub mod spl;
pub mod transaction;

// Re-export commonly used items
pub use constants::{find_token, known_tokens, RAY_MINT, SOL_MINT, USDC_MINT, USDT_MINT};
pub use native::get_sol_balance;
pub use spl::{get_spl_token_balance, resolve_mint_decimals};
pub use transaction::SwapTransaction;
