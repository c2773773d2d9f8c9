mod swap;
mod swap_result;
mod swapper_error;
mod token;
mod token_balance;

pub use swap::SwapOrder;
pub use swap_result::SwapOutcome;
pub use swapper_error::{SwapStage, SwapperError};
pub use token::Token;
pub use token_balance::{NativeBalance, TokenBalance};
