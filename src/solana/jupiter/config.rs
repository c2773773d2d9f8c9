use crate::config::DEFAULT_QUOTE_API_URL;

/// Jupiter API configuration
#[derive(Debug, Clone)]
pub struct JupiterConfig {
    /// Base URL serving `/quote` and `/swap`
    pub quote_api_url: String,
}

impl Default for JupiterConfig {
    fn default() -> Self {
        Self {
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
        }
    }
}
