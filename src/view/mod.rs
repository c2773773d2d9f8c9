pub mod balance_view;

pub use balance_view::{
    BalanceResponse, ErrorResponse, HealthResponse, TokenBalanceResponse, TokensResponse,
};
