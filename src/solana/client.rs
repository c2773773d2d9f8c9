use async_trait::async_trait;
use log::{debug, warn};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcSendTransactionConfig, RpcSimulateTransactionConfig};
use solana_client::rpc_request::TokenAccountsFilter;
use solana_client::rpc_response::RpcSimulateTransactionResult;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
    signature::Signature,
};
use solana_transaction_status::UiTransactionEncoding;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::entity::SwapperError;
use crate::solana::tokens::transaction::SwapTransaction;
use crate::solana::wallet::parse_pubkey;

const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Create a Solana client with confirmed commitment
pub fn create_solana_client(rpc_url: &str) -> Arc<RpcClient> {
    let client = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

    Arc::new(client)
}

/// Outcome of a successful simulation
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub units_consumed: Option<u64>,
    pub logs: Vec<String>,
}

/// The chain RPC operations the balance service and swap orchestrator rely on
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Native balance in lamports
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64, SwapperError>;

    /// Token accounts owned by `owner` for the given mint
    async fn get_token_accounts(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<Pubkey>, SwapperError>;

    /// Raw account data, `None` when the account does not exist
    async fn get_account_data(&self, account: &Pubkey) -> Result<Option<Vec<u8>>, SwapperError>;

    /// Execute the transaction against current state without committing it
    async fn simulate_transaction(&self, transaction: &SwapTransaction) -> Result<SimulationReport, SwapperError>;

    /// Submit a signed transaction; `max_retries` is handed to the RPC node
    async fn send_transaction(&self, transaction: &SwapTransaction, max_retries: usize) -> Result<Signature, SwapperError>;

    /// Wait until the signature reaches `confirmed` commitment
    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), SwapperError>;
}

/// `ChainClient` backed by a Solana JSON-RPC node
pub struct SolanaChainClient {
    rpc: Arc<RpcClient>,
    confirm_timeout: Duration,
}

impl SolanaChainClient {
    pub fn new(rpc: Arc<RpcClient>, confirm_timeout: Duration) -> Self {
        Self { rpc, confirm_timeout }
    }

    fn simulation_config() -> RpcSimulateTransactionConfig {
        RpcSimulateTransactionConfig {
            sig_verify: false,
            commitment: Some(CommitmentConfig::confirmed()),
            encoding: Some(UiTransactionEncoding::Base64),
            ..RpcSimulateTransactionConfig::default()
        }
    }

    fn send_config(max_retries: usize) -> RpcSendTransactionConfig {
        RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(CommitmentLevel::Confirmed),
            encoding: Some(UiTransactionEncoding::Base64),
            max_retries: Some(max_retries),
            ..RpcSendTransactionConfig::default()
        }
    }
}

fn simulation_report(result: RpcSimulateTransactionResult) -> Result<SimulationReport, SwapperError> {
    let logs = result.logs.unwrap_or_default();

    if let Some(err) = result.err {
        return Err(SwapperError::SimulationFailed {
            detail: format!("{:?}", err),
            logs,
        });
    }

    Ok(SimulationReport {
        units_consumed: result.units_consumed,
        logs,
    })
}

#[async_trait]
impl ChainClient for SolanaChainClient {
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64, SwapperError> {
        self.rpc
            .get_balance(owner)
            .await
            .map_err(|e| SwapperError::NetworkFailure(format!("Failed to get balance: {}", e)))
    }

    async fn get_token_accounts(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<Pubkey>, SwapperError> {
        let accounts = self
            .rpc
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::Mint(*mint))
            .await
            .map_err(|e| SwapperError::NetworkFailure(format!("Failed to get token accounts: {}", e)))?;

        accounts
            .iter()
            .map(|keyed_account| {
                parse_pubkey(&keyed_account.pubkey).map_err(|e| {
                    SwapperError::NetworkFailure(format!("RPC returned a bad token account key: {}", e))
                })
            })
            .collect()
    }

    async fn get_account_data(&self, account: &Pubkey) -> Result<Option<Vec<u8>>, SwapperError> {
        let response = self
            .rpc
            .get_account_with_commitment(account, self.rpc.commitment())
            .await
            .map_err(|e| SwapperError::NetworkFailure(format!("Failed to get account info: {}", e)))?;

        Ok(response.value.map(|account| account.data))
    }

    async fn simulate_transaction(&self, transaction: &SwapTransaction) -> Result<SimulationReport, SwapperError> {
        let config = Self::simulation_config();
        let response = match transaction {
            SwapTransaction::Legacy(tx) => self.rpc.simulate_transaction_with_config(tx, config).await,
            SwapTransaction::Versioned(tx) => self.rpc.simulate_transaction_with_config(tx, config).await,
        }
        .map_err(|e| SwapperError::SimulationFailed {
            detail: e.to_string(),
            logs: Vec::new(),
        })?;

        simulation_report(response.value)
    }

    async fn send_transaction(&self, transaction: &SwapTransaction, max_retries: usize) -> Result<Signature, SwapperError> {
        let config = Self::send_config(max_retries);
        match transaction {
            SwapTransaction::Legacy(tx) => self.rpc.send_transaction_with_config(tx, config).await,
            SwapTransaction::Versioned(tx) => self.rpc.send_transaction_with_config(tx, config).await,
        }
        .map_err(|e| SwapperError::SubmissionFailed(e.to_string()))
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), SwapperError> {
        let deadline = Instant::now() + self.confirm_timeout;
        let mut last_rpc_error = None;

        loop {
            match self
                .rpc
                .get_signature_status_with_commitment(signature, CommitmentConfig::confirmed())
                .await
            {
                Ok(Some(Ok(()))) => return Ok(()),
                Ok(Some(Err(e))) => {
                    return Err(SwapperError::ConfirmationFailed(format!("{}: {}", signature, e)))
                }
                Ok(None) => {
                    debug!("Transaction {} not confirmed yet", signature);
                    last_rpc_error = None;
                }
                Err(e) => {
                    warn!("Failed to get status of {}: {}", signature, e);
                    last_rpc_error = Some(e.to_string());
                }
            }

            if Instant::now() >= deadline {
                return Err(deadline_error(signature, last_rpc_error));
            }

            sleep(CONFIRM_POLL_INTERVAL).await;
        }
    }
}

// Out of time: report the RPC failure if that is why the status never arrived
fn deadline_error(signature: &Signature, last_rpc_error: Option<String>) -> SwapperError {
    match last_rpc_error {
        Some(e) => SwapperError::ConfirmationFailed(format!("{}: {}", signature, e)),
        None => SwapperError::ConfirmationTimeout(signature.to_string()),
    }
}
