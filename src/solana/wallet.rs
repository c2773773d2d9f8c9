use anyhow::{anyhow, Result};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::str::FromStr;

use crate::entity::SwapperError;

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    let keypair = Keypair::try_from(keypair_bytes.as_slice())
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))?;

    Ok(keypair)
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey, SwapperError> {
    Pubkey::from_str(address.trim())
        .map_err(|e| SwapperError::InvalidAddress(format!("{} ({})", address, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    #[test]
    fn test_keypair_base58_round_trip() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();

        let restored = keypair_from_base58(&encoded).unwrap();
        assert_eq!(restored.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_keypair_errors_do_not_echo_input() {
        let short = bs58::encode([7u8; 32]).into_string();
        let err = keypair_from_base58(&short).unwrap_err().to_string();
        assert_eq!(err, "Invalid keypair length: 32");
        assert!(!err.contains(&short));
    }

    #[test]
    fn test_parse_pubkey() {
        assert!(parse_pubkey(crate::solana::tokens::constants::USDC_MINT).is_ok());
        assert!(matches!(
            parse_pubkey("not-a-wallet"),
            Err(SwapperError::InvalidAddress(_))
        ));
    }
}
