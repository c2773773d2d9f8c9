use solana_sdk::pubkey::Pubkey;

use crate::entity::{NativeBalance, SwapperError};
use crate::solana::client::ChainClient;
use crate::solana::utils::{format_amount, lamports_to_sol};

/// Decimal places of the displayed SOL balance
pub const SOL_DISPLAY_DECIMALS: u32 = 4;

/// Get SOL balance
pub async fn get_sol_balance(chain: &dyn ChainClient, owner: &Pubkey) -> Result<NativeBalance, SwapperError> {
    let lamports = chain.get_balance(owner).await?;

    Ok(NativeBalance {
        balance: format_amount(lamports_to_sol(lamports), SOL_DISPLAY_DECIMALS),
        lamports,
    })
}
