//! Gateway configuration.

use url::Url;

use crate::error::ApiError;

pub const BASE_URL_ENV: &str = "API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    /// Read the base URL from `API_BASE_URL`, falling back to the local
    /// development endpoint.
    pub fn from_env() -> Result<Self, ApiError> {
        let raw = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&raw)
    }

    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Network(format!("invalid base url: {e}")))?;
        Ok(Self { base_url })
    }
}
