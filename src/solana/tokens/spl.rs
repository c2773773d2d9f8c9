use log::debug;
use solana_sdk::pubkey::Pubkey;

use crate::entity::{SwapperError, TokenBalance};
use crate::solana::client::ChainClient;
use crate::solana::tokens::constants::{find_token, DEFAULT_TOKEN_DECIMALS};
use crate::solana::utils::{format_amount, from_base_units};

// SPL token account layout: mint (32) | owner (32) | amount (u64 LE) | ...
const TOKEN_ACCOUNT_AMOUNT_OFFSET: usize = 64;
// SPL mint layout: mint_authority (36) | supply (8) | decimals (u8) | ...
const MINT_DECIMALS_OFFSET: usize = 44;

/// Decimal places of a displayed token balance
pub const TOKEN_DISPLAY_DECIMALS: u32 = 2;

/// Read the raw amount field out of a token account's data
pub fn decode_token_amount(data: &[u8]) -> Result<u64, SwapperError> {
    let end = TOKEN_ACCOUNT_AMOUNT_OFFSET + 8;
    let bytes: [u8; 8] = data
        .get(TOKEN_ACCOUNT_AMOUNT_OFFSET..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            SwapperError::NetworkFailure(format!(
                "Token account data too short: {} bytes",
                data.len()
            ))
        })?;

    Ok(u64::from_le_bytes(bytes))
}

/// Read the decimals field out of a mint account's data
pub fn decode_mint_decimals(data: &[u8]) -> Option<u8> {
    data.get(MINT_DECIMALS_OFFSET).copied()
}

/// Decimal count for a mint: catalog first, then the mint account, then the default
pub async fn resolve_mint_decimals(chain: &dyn ChainClient, mint: &Pubkey) -> Result<u8, SwapperError> {
    if let Some(token) = find_token(&mint.to_string()) {
        return Ok(token.decimals);
    }

    let decimals = chain
        .get_account_data(mint)
        .await?
        .and_then(|data| decode_mint_decimals(&data))
        .unwrap_or(DEFAULT_TOKEN_DECIMALS);

    debug!("Resolved {} decimals for mint {}", decimals, mint);
    Ok(decimals)
}

/// Get balance of a specific SPL token held by `owner`
pub async fn get_spl_token_balance(
    chain: &dyn ChainClient,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<TokenBalance, SwapperError> {
    let zero = TokenBalance {
        balance: format_amount(Default::default(), TOKEN_DISPLAY_DECIMALS),
        mint: mint.to_string(),
    };

    let token_accounts = chain.get_token_accounts(owner, mint).await?;
    let Some(token_account) = token_accounts.first() else {
        return Ok(zero);
    };

    let Some(data) = chain.get_account_data(token_account).await? else {
        return Ok(zero);
    };

    let raw_amount = decode_token_amount(&data)?;
    let decimals = resolve_mint_decimals(chain, mint).await?;
    // An unrepresentable amount here means the mint account is bad, not the request
    let amount = from_base_units(raw_amount, decimals).map_err(|e| {
        SwapperError::NetworkFailure(format!("Unusable token data for mint {}: {}", mint, e))
    })?;

    Ok(TokenBalance {
        balance: format_amount(amount, TOKEN_DISPLAY_DECIMALS),
        mint: mint.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; 165];
    data[..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    data[108] = 1; // initialized
    data
}

#[cfg(test)]
pub(crate) fn mint_data(decimals: u8) -> Vec<u8> {
    let mut data = vec![0u8; 82];
    data[MINT_DECIMALS_OFFSET] = decimals;
    data[45] = 1; // initialized
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::client::mock::MockChainClient;
    use crate::solana::tokens::constants::USDC_MINT;
    use std::str::FromStr;

    #[test]
    fn test_decode_token_amount() {
        let data = token_account_data(&Pubkey::new_unique(), &Pubkey::new_unique(), 1_234_567);
        assert_eq!(decode_token_amount(&data).unwrap(), 1_234_567);
        assert!(matches!(
            decode_token_amount(&data[..70]),
            Err(SwapperError::NetworkFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_no_token_account_reports_zero() {
        let chain = MockChainClient::new();
        let mint = Pubkey::from_str(USDC_MINT).unwrap();

        let balance = get_spl_token_balance(&chain, &Pubkey::new_unique(), &mint).await.unwrap();
        assert_eq!(balance.balance, "0.00");
        assert_eq!(balance.mint, USDC_MINT);
        assert_eq!(chain.calls(), vec!["get_token_accounts"]);
    }

    #[tokio::test]
    async fn test_catalog_token_balance() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::from_str(USDC_MINT).unwrap();
        let account = Pubkey::new_unique();
        let mut chain = MockChainClient::new();
        chain.token_accounts = vec![account];
        chain.accounts.insert(account, token_account_data(&mint, &owner, 15_678_900));

        let balance = get_spl_token_balance(&chain, &owner, &mint).await.unwrap();
        assert_eq!(balance.balance, "15.68");
        // USDC decimals come from the catalog, no mint lookup
        assert_eq!(chain.calls(), vec!["get_token_accounts", "get_account_data"]);
    }

    #[tokio::test]
    async fn test_unlisted_mint_uses_mint_decimals() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let account = Pubkey::new_unique();
        let mut chain = MockChainClient::new();
        chain.token_accounts = vec![account];
        chain.accounts.insert(account, token_account_data(&mint, &owner, 250_000_000_000));
        chain.accounts.insert(mint, mint_data(9));

        let balance = get_spl_token_balance(&chain, &owner, &mint).await.unwrap();
        assert_eq!(balance.balance, "250.00");
    }

    #[tokio::test]
    async fn test_missing_mint_account_defaults_to_six_decimals() {
        let chain = MockChainClient::new();
        assert_eq!(
            resolve_mint_decimals(&chain, &Pubkey::new_unique()).await.unwrap(),
            DEFAULT_TOKEN_DECIMALS
        );
    }

    #[tokio::test]
    async fn test_bad_mint_decimals_is_network_failure() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let account = Pubkey::new_unique();
        let mut chain = MockChainClient::new();
        chain.token_accounts = vec![account];
        chain.accounts.insert(account, token_account_data(&mint, &owner, 1_000));
        chain.accounts.insert(mint, mint_data(29));

        let result = get_spl_token_balance(&chain, &owner, &mint).await;
        match result {
            Err(e @ SwapperError::NetworkFailure(_)) => assert!(!e.is_client_error()),
            other => panic!("expected network failure, got {:?}", other),
        }
    }
}
