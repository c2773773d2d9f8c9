use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SwapOutcome {
    pub input_amount: Decimal,
    pub output_amount: Decimal,
    pub price_impact_pct: String,
    pub route_legs: usize,
    /// Present only when the transaction was actually sent and confirmed
    pub signature: Option<String>,
}

impl SwapOutcome {
    pub fn simulated(&self) -> bool {
        self.signature.is_none()
    }
}
