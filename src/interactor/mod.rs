pub mod balance_interactor;
pub mod swap_interactor;

pub use balance_interactor::{BalanceInteractor, BalanceInteractorImpl};
pub use swap_interactor::{SwapInteractor, SwapInteractorImpl};
