use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, error};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::di::ServiceContainer;
use crate::entity::SwapperError;
use crate::solana::tokens::known_tokens;
use crate::view::{
    BalanceResponse, ErrorResponse, HealthResponse, TokenBalanceResponse, TokensResponse,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BalanceRequest {
    wallet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenBalanceRequest {
    wallet: Option<String>,
    mint: Option<String>,
}

/// Failed API call, rendered as `{success: false, error}`
#[derive(Debug)]
enum ApiError {
    MissingField(&'static str),
    Rejected(StatusCode, String),
    NotFound,
    Swapper(SwapperError),
}

impl From<SwapperError> for ApiError {
    fn from(e: SwapperError) -> Self {
        Self::Swapper(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingField(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            Self::Rejected(status, message) => (status, message),
            Self::NotFound => (StatusCode::NOT_FOUND, "Route not found".to_string()),
            Self::Swapper(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Swapper(e) => {
                error!("Balance request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// Like `express.json()`: no JSON content type or an unparsable body reads as `{}`
fn request_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) | Err(JsonRejection::JsonSyntaxError(_)) => {
            Ok(T::default())
        }
        Err(rejection) => Err(ApiError::Rejected(rejection.status(), rejection.body_text())),
    }
}

fn present(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Balance API under `/api` with a JSON 404 fallback
pub fn create_router(services: Arc<ServiceContainer>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(services)
}

fn api_routes() -> Router<Arc<ServiceContainer>> {
    Router::new()
        .route("/balance", post(balance))
        .route("/token-balance", post(token_balance))
        .route("/tokens", get(tokens))
        .route("/health", get(health))
}

async fn balance(
    State(services): State<Arc<ServiceContainer>>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let request = request_body(payload)?;
    let wallet = present(request.wallet).ok_or(ApiError::MissingField("Wallet address required"))?;

    let balance = services
        .balance_interactor()
        .get_native_balance(&wallet)
        .await?;

    Ok(Json(balance.into()))
}

async fn token_balance(
    State(services): State<Arc<ServiceContainer>>,
    payload: Result<Json<TokenBalanceRequest>, JsonRejection>,
) -> Result<Json<TokenBalanceResponse>, ApiError> {
    let request = request_body(payload)?;
    let (wallet, mint) = match (present(request.wallet), present(request.mint)) {
        (Some(wallet), Some(mint)) => (wallet, mint),
        _ => return Err(ApiError::MissingField("Wallet address and mint required")),
    };

    let balance = services
        .balance_interactor()
        .get_token_balance(&wallet, &mint)
        .await?;

    Ok(Json(balance.into()))
}

async fn tokens() -> Json<TokensResponse> {
    Json(known_tokens().into())
}

async fn health(State(services): State<Arc<ServiceContainer>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "Server running".to_string(),
        network: services.network().to_string(),
        rpc: services.rpc_url().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    debug!("No route for {}", uri);
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::solana::client::mock::MockChainClient;
    use crate::solana::client::ChainClient;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use config::Environment;
    use serde_json::{json, Value};
    use solana_sdk::pubkey::Pubkey;
    use tower::ServiceExt;

    fn app(chain: Option<Arc<MockChainClient>>) -> Router {
        let config = AppConfig::from_environment(Environment::default().source(Some(
            config::Map::from([("NETWORK".to_string(), "devnet".to_string())]),
        )))
        .unwrap();
        let chain = chain.map(|chain| chain as Arc<dyn ChainClient>);

        create_router(Arc::new(ServiceContainer::new(&config, chain)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_tokens_served_without_chain_calls() {
        let chain = Arc::new(MockChainClient::new());
        let (status, body) = send(app(Some(chain.clone())), get("/api/tokens")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["tokens"]["USDC"]["decimals"], 6);
        assert_eq!(body["tokens"]["SOL"]["mint"], crate::solana::SOL_MINT);
        assert!(body["tokens"]["USDT"]["logoURI"].as_str().unwrap().ends_with("logo.svg"));
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_balance() {
        let chain = Arc::new(MockChainClient {
            lamports: 1_500_000_000,
            ..MockChainClient::new()
        });
        let request = post_json("/api/balance", json!({ "wallet": Pubkey::new_unique().to_string() }));

        let (status, body) = send(app(Some(chain)), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "balance": "1.5000", "lamports": 1_500_000_000u64 }));
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_requests() {
        let (status, body) = send(app(None), post_json("/api/balance", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "Wallet address required" }));

        let request = post_json(
            "/api/token-balance",
            json!({ "wallet": Pubkey::new_unique().to_string() }),
        );
        let (status, body) = send(app(None), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Wallet address and mint required");
    }

    #[tokio::test]
    async fn test_body_without_json_content_type_reads_as_empty() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/balance")
            .body(Body::from(json!({ "wallet": Pubkey::new_unique().to_string() }).to_string()))
            .unwrap();

        let (status, body) = send(app(None), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "Wallet address required" }));
    }

    #[tokio::test]
    async fn test_unparsable_body_reads_as_empty() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/token-balance")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let (status, body) = send(app(None), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "error": "Wallet address and mint required" }));
    }

    #[tokio::test]
    async fn test_wrong_field_type_answers_json_error() {
        let (status, body) = send(app(None), post_json("/api/balance", json!({ "wallet": 123 }))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Failed to deserialize the JSON body"));
    }

    #[tokio::test]
    async fn test_invalid_address_is_bad_request() {
        let chain = Arc::new(MockChainClient::new());
        let request = post_json("/api/balance", json!({ "wallet": "not-a-wallet" }));

        let (status, body) = send(app(Some(chain.clone())), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid address"));
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_downstream_failures_are_server_errors() {
        let wallet = Pubkey::new_unique().to_string();

        let (status, body) = send(app(None), post_json("/api/balance", json!({ "wallet": wallet }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "RPC connection not initialized");

        let chain = Arc::new(MockChainClient {
            fail_rpc: true,
            ..MockChainClient::new()
        });
        let request = post_json(
            "/api/token-balance",
            json!({ "wallet": wallet, "mint": crate::solana::USDC_MINT }),
        );
        let (status, body) = send(app(Some(chain)), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_token_balance_without_accounts() {
        let request = post_json(
            "/api/token-balance",
            json!({ "wallet": Pubkey::new_unique().to_string(), "mint": crate::solana::USDC_MINT }),
        );

        let (status, body) = send(app(Some(Arc::new(MockChainClient::new()))), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], "0.00");
        assert_eq!(body["mint"], crate::solana::USDC_MINT);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(None), get("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Server running");
        assert_eq!(body["network"], "devnet");
        assert_eq!(body["rpc"], crate::config::DEFAULT_RPC_URL);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(app(None), get("/api/nothing-here")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "error": "Route not found" }));
    }
}
