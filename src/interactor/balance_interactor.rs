use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::entity::{NativeBalance, SwapperError, TokenBalance};
use crate::solana::client::ChainClient;
use crate::solana::tokens::{get_sol_balance, get_spl_token_balance};
use crate::solana::wallet::parse_pubkey;

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    async fn get_native_balance(&self, wallet: &str) -> Result<NativeBalance, SwapperError>;

    async fn get_token_balance(&self, wallet: &str, mint: &str) -> Result<TokenBalance, SwapperError>;
}

pub struct BalanceInteractorImpl {
    // None when the RPC connection could not be set up at startup
    chain: Option<Arc<dyn ChainClient>>,
}

impl BalanceInteractorImpl {
    pub fn new(chain: Option<Arc<dyn ChainClient>>) -> Self {
        Self { chain }
    }

    fn chain(&self) -> Result<&dyn ChainClient, SwapperError> {
        self.chain.as_deref().ok_or(SwapperError::RpcUnavailable)
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_native_balance(&self, wallet: &str) -> Result<NativeBalance, SwapperError> {
        let owner = parse_pubkey(wallet)?;
        let chain = self.chain()?;

        debug!("Getting SOL balance for {}", owner);
        get_sol_balance(chain, &owner).await
    }

    async fn get_token_balance(&self, wallet: &str, mint: &str) -> Result<TokenBalance, SwapperError> {
        let owner = parse_pubkey(wallet)?;
        let mint = parse_pubkey(mint)?;
        let chain = self.chain()?;

        debug!("Getting {} balance for {}", mint, owner);
        get_spl_token_balance(chain, &owner, &mint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::client::mock::MockChainClient;
    use crate::solana::tokens::spl::token_account_data;
    use crate::solana::tokens::USDT_MINT;
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    fn interactor(chain: Arc<MockChainClient>) -> BalanceInteractorImpl {
        BalanceInteractorImpl::new(Some(chain as Arc<dyn ChainClient>))
    }

    #[tokio::test]
    async fn test_native_balance() {
        let chain = Arc::new(MockChainClient {
            lamports: 987_654_321,
            ..MockChainClient::new()
        });

        let balance = interactor(chain)
            .get_native_balance(&Pubkey::new_unique().to_string())
            .await
            .unwrap();
        assert_eq!(balance.balance, "0.9877");
        assert_eq!(balance.lamports, 987_654_321);
    }

    #[tokio::test]
    async fn test_invalid_address_fails_before_network() {
        let chain = Arc::new(MockChainClient::new());
        let balances = interactor(chain.clone());

        let native = balances.get_native_balance("definitely-not-base58!").await;
        assert!(matches!(native, Err(SwapperError::InvalidAddress(_))));

        let token = balances
            .get_token_balance(&Pubkey::new_unique().to_string(), "0xdeadbeef")
            .await;
        assert!(matches!(token, Err(SwapperError::InvalidAddress(_))));

        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_connection_is_rpc_unavailable() {
        let balances = BalanceInteractorImpl::new(None);
        let wallet = Pubkey::new_unique().to_string();

        assert!(matches!(
            balances.get_native_balance(&wallet).await,
            Err(SwapperError::RpcUnavailable)
        ));
        assert!(matches!(
            balances.get_token_balance(&wallet, USDT_MINT).await,
            Err(SwapperError::RpcUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_token_balance_zero_and_funded() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::from_str(USDT_MINT).unwrap();

        let empty = interactor(Arc::new(MockChainClient::new()))
            .get_token_balance(&owner.to_string(), USDT_MINT)
            .await
            .unwrap();
        assert_eq!(empty.balance, "0.00");

        let account = Pubkey::new_unique();
        let mut chain = MockChainClient::new();
        chain.token_accounts = vec![account];
        chain.accounts.insert(account, token_account_data(&mint, &owner, 3_000_000));

        let funded = interactor(Arc::new(chain))
            .get_token_balance(&owner.to_string(), USDT_MINT)
            .await
            .unwrap();
        assert_eq!(funded.balance, "3.00");
        assert_eq!(funded.mint, USDT_MINT);
    }
}
