pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod router;
pub mod solana;
pub mod view;

// Re-export commonly used items
pub use self::config::{AppConfig, SwapSettings, TransactionEncoding};
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use router::create_router;
pub use solana::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
