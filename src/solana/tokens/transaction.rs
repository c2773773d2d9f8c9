use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use solana_sdk::{
    signature::{Keypair, Signature},
    transaction::{Transaction, VersionedTransaction},
};

use crate::config::TransactionEncoding;
use crate::entity::SwapperError;

/// A swap transaction as returned by the aggregator, in either wire encoding
#[derive(Debug, Clone)]
pub enum SwapTransaction {
    Legacy(Transaction),
    Versioned(VersionedTransaction),
}

impl SwapTransaction {
    /// Decode a base64 payload and deserialize it with the requested encoding
    pub fn from_base64(payload: &str, encoding: TransactionEncoding) -> Result<Self, SwapperError> {
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| SwapperError::BuildFailed(format!("Invalid base64 transaction: {}", e)))?;

        Self::deserialize(&bytes, encoding)
    }

    pub fn deserialize(bytes: &[u8], encoding: TransactionEncoding) -> Result<Self, SwapperError> {
        let transaction = match encoding {
            TransactionEncoding::Versioned => bincode::deserialize::<VersionedTransaction>(bytes)
                .map(Self::Versioned),
            TransactionEncoding::Legacy => {
                bincode::deserialize::<Transaction>(bytes).map(Self::Legacy)
            }
        }
        .map_err(|e| SwapperError::BuildFailed(format!("Failed to deserialize transaction: {}", e)))?;

        Ok(transaction)
    }

    pub fn encoding(&self) -> TransactionEncoding {
        match self {
            Self::Legacy(_) => TransactionEncoding::Legacy,
            Self::Versioned(_) => TransactionEncoding::Versioned,
        }
    }

    /// Sign with the wallet keypair. The two encodings need different signing calls.
    pub fn sign(self, keypair: &Keypair) -> Result<Self, SwapperError> {
        match self {
            Self::Versioned(transaction) => VersionedTransaction::try_new(transaction.message, &[keypair])
                .map(Self::Versioned)
                .map_err(|e| SwapperError::SubmissionFailed(format!("Failed to sign transaction: {}", e))),
            Self::Legacy(mut transaction) => {
                let blockhash = transaction.message.recent_blockhash;
                transaction
                    .try_sign(&[keypair], blockhash)
                    .map_err(|e| SwapperError::SubmissionFailed(format!("Failed to sign transaction: {}", e)))?;
                Ok(Self::Legacy(transaction))
            }
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SwapperError> {
        match self {
            Self::Legacy(transaction) => bincode::serialize(transaction),
            Self::Versioned(transaction) => bincode::serialize(transaction),
        }
        .map_err(|e| SwapperError::SubmissionFailed(format!("Failed to serialize transaction: {}", e)))
    }

    /// Fee payer signature slot; default (all zeros) until signed
    pub fn signature(&self) -> Option<Signature> {
        match self {
            Self::Legacy(transaction) => transaction.signatures.first().copied(),
            Self::Versioned(transaction) => transaction.signatures.first().copied(),
        }
    }
}
