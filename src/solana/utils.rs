use crate::entity::SwapperError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::tokens::constants::SOL_DECIMALS;

// Constants for conversion
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert a display amount into the token's smallest units, rounding down
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<u64, SwapperError> {
    if amount <= Decimal::ZERO {
        return Err(SwapperError::InvalidAmount(format!(
            "amount must be greater than zero, got {}",
            amount
        )));
    }

    let scale = 10u64
        .checked_pow(decimals as u32)
        .map(Decimal::from)
        .ok_or_else(|| SwapperError::InvalidAmount(format!("unsupported decimals {}", decimals)))?;

    let units = amount
        .checked_mul(scale)
        .and_then(|scaled| scaled.floor().to_u64())
        .ok_or_else(|| SwapperError::InvalidAmount(format!("amount {} is too large", amount)))?;

    if units == 0 {
        return Err(SwapperError::InvalidAmount(format!(
            "amount {} is below the smallest unit",
            amount
        )));
    }

    Ok(units)
}

/// Convert smallest units back into a display amount
pub fn from_base_units(units: u64, decimals: u8) -> Result<Decimal, SwapperError> {
    Decimal::try_from_i128_with_scale(units as i128, decimals as u32)
        .map_err(|e| SwapperError::InvalidAmount(format!("unsupported decimals {}: {}", decimals, e)))
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(lamports as i128, SOL_DECIMALS as u32)
}

/// Format with exactly `decimal_places` digits, rounding half away from zero
pub fn format_amount(value: Decimal, decimal_places: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimal_places as usize, rounded)
}
