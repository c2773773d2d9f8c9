use crate::entity::Token;
use rust_decimal::Decimal;

/// A single swap attempt: how much of which token to trade for which
#[derive(Debug, Clone)]
pub struct SwapOrder {
    pub amount: Decimal,
    pub input: Token,
    pub output: Token,
}
