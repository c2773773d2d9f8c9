use std::fmt;

/// Stage of the swap pipeline an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStage {
    Quote,
    Build,
    Simulate,
    Submit,
    Confirm,
}

impl fmt::Display for SwapStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Quote => write!(f, "quote"),
            Self::Build => write!(f, "build"),
            Self::Simulate => write!(f, "simulate"),
            Self::Submit => write!(f, "submit"),
            Self::Confirm => write!(f, "confirm"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SwapperError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("RPC connection not initialized")]
    RpcUnavailable,

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Failed to get quote: {0}")]
    QuoteUnavailable(String),

    #[error("Failed to build swap transaction: {0}")]
    BuildFailed(String),

    #[error("Simulation failed: {detail}")]
    SimulationFailed { detail: String, logs: Vec<String> },

    #[error("Failed to send transaction: {0}")]
    SubmissionFailed(String),

    #[error("Transaction {0} was not confirmed in time")]
    ConfirmationTimeout(String),

    #[error("Transaction confirmation failed: {0}")]
    ConfirmationFailed(String),
}

impl SwapperError {
    /// Pipeline stage that produced the error, if it came from the swap flow
    pub fn stage(&self) -> Option<SwapStage> {
        match self {
            Self::QuoteUnavailable(_) => Some(SwapStage::Quote),
            Self::BuildFailed(_) => Some(SwapStage::Build),
            Self::SimulationFailed { .. } => Some(SwapStage::Simulate),
            Self::SubmissionFailed(_) => Some(SwapStage::Submit),
            Self::ConfirmationTimeout(_) | Self::ConfirmationFailed(_) => Some(SwapStage::Confirm),
            _ => None,
        }
    }

    /// Whether the caller supplied bad input, as opposed to a downstream failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::InvalidAmount(_))
    }
}
