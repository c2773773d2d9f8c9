// src/solana/jupiter/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use solana_sdk::pubkey::Pubkey;
use std::fmt;

use crate::config::TransactionEncoding;
use crate::entity::SwapperError;

// Swap modes (exact input or exact output amount)
#[derive(Serialize, Deserialize, Default, PartialEq, Clone, Copy, Debug)]
pub enum SwapMode {
    #[default]
    ExactIn,
    ExactOut,
}

impl fmt::Display for SwapMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::ExactIn => write!(f, "ExactIn"),
            Self::ExactOut => write!(f, "ExactOut"),
        }
    }
}

// Accepts a string or a JSON number and keeps it as a string, so values pass
// back to the aggregator in the form it sent them.
pub mod string_or_number {
    use serde::{self, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumber;

        impl<'de> serde::de::Visitor<'de> for StringOrNumber {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a string containing a number")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(value.to_string())
            }
        }

        deserializer.deserialize_any(StringOrNumber)
    }
}

// Quote request parameters
#[derive(Default, Debug, Clone)]
pub struct QuoteParams {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
    pub swap_mode: SwapMode,
    pub only_direct_routes: bool,
    pub as_legacy_transaction: bool,
}

impl QuoteParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("inputMint", self.input_mint.clone()),
            ("outputMint", self.output_mint.clone()),
            ("amount", self.amount.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
            ("swapMode", self.swap_mode.to_string()),
            ("onlyDirectRoutes", self.only_direct_routes.to_string()),
            ("asLegacyTransaction", self.as_legacy_transaction.to_string()),
        ]
    }
}

// Quote returned by the API. Fields we do not read are kept in `extra` so the
// quote goes back to `/swap` unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    pub other_amount_threshold: String,
    pub swap_mode: SwapMode,
    pub slippage_bps: u16,
    #[serde(with = "string_or_number")]
    pub price_impact_pct: String,
    #[serde(default)]
    pub route_plan: Vec<RoutePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_slot: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuoteResponse {
    /// Input amount in smallest units
    pub fn in_amount_units(&self) -> Result<u64, SwapperError> {
        parse_units("inAmount", &self.in_amount)
    }

    /// Output amount in smallest units
    pub fn out_amount_units(&self) -> Result<u64, SwapperError> {
        parse_units("outAmount", &self.out_amount)
    }
}

fn parse_units(field: &str, value: &str) -> Result<u64, SwapperError> {
    value
        .parse::<u64>()
        .map_err(|e| SwapperError::QuoteUnavailable(format!("Invalid {} '{}': {}", field, value, e)))
}

// One leg of the swap route
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub swap_info: SwapInfo,
    pub percent: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Token exchange details for a route leg
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub amm_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_mint: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Compute unit price for the swap transaction; the aggregator picks it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ComputeUnitPrice {
    #[serde(rename = "auto")]
    Auto,
}

// Swap transaction request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub quote_response: QuoteResponse,
    pub user_public_key: String,
    pub wrap_and_unwrap_sol: bool,
    pub use_shared_accounts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_account: Option<String>,
    pub compute_unit_price_micro_lamports: ComputeUnitPrice,
    pub as_legacy_transaction: bool,
}

impl SwapRequest {
    pub fn new(quote_response: QuoteResponse, user: &Pubkey, encoding: TransactionEncoding) -> Self {
        Self {
            quote_response,
            user_public_key: user.to_string(),
            wrap_and_unwrap_sol: true,
            use_shared_accounts: true,
            fee_account: None,
            compute_unit_price_micro_lamports: ComputeUnitPrice::Auto,
            as_legacy_transaction: encoding == TransactionEncoding::Legacy,
        }
    }
}

// Swap transaction response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    /// Base64 encoded unsigned transaction
    pub swap_transaction: String,
    #[serde(default)]
    pub last_valid_block_height: Option<u64>,
    #[serde(default)]
    pub prioritization_fee_lamports: Option<u64>,
}

#[cfg(test)]
pub(crate) fn sample_quote_json(in_amount: u64, out_amount: u64) -> Value {
    use crate::solana::tokens::constants::{SOL_MINT, USDC_MINT};

    serde_json::json!({
        "inputMint": SOL_MINT,
        "inAmount": in_amount.to_string(),
        "outputMint": USDC_MINT,
        "outAmount": out_amount.to_string(),
        "otherAmountThreshold": (out_amount - out_amount / 200).to_string(),
        "swapMode": "ExactIn",
        "slippageBps": 50,
        "platformFee": null,
        "priceImpactPct": "0.0001",
        "routePlan": [{
            "swapInfo": {
                "ammKey": "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2",
                "label": "Raydium",
                "inputMint": SOL_MINT,
                "outputMint": USDC_MINT,
                "inAmount": in_amount.to_string(),
                "outAmount": out_amount.to_string(),
                "feeAmount": "2500",
                "feeMint": SOL_MINT
            },
            "percent": 100
        }],
        "contextSlot": 301234567,
        "timeTaken": 0.012
    })
}
