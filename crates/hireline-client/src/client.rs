//! Authenticated HTTP client.
//!
//! Thin pass-through by design: one request, one typed result. No retries
//! and no client-side timeout; retry and backoff policy belongs to callers.

use std::sync::Arc;

use hireline_auth::TokenStore;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Request with no body; keeps the generic `request` call sites readable.
pub(crate) const NO_BODY: Option<&()> = None;

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Hireline backend
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }
}

/// Shape of the backend's JSON error bodies.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Authenticated client for the Hireline REST API.
///
/// Cheap to clone; clones share the connection pool and token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    store: Arc<TokenStore>,
}

impl ApiClient {
    /// Create a new API client reading tokens from `store`.
    pub fn new(config: ApiConfig, store: Arc<TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
        }
    }

    /// Create from environment variables.
    pub fn from_env(store: Arc<TokenStore>) -> Self {
        Self::new(ApiConfig::from_env(), store)
    }

    /// Perform one authenticated call and parse the JSON response into `T`.
    ///
    /// An empty 2xx body (204 included) parses as JSON `null`, so unit
    /// results deserialize without a parse error.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when no token is cached (checked before any network
    /// I/O), `Api` for non-2xx responses, `Network` when no response was
    /// obtained, `Json` when a success body fails to parse.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self.store.get().ok_or(ClientError::Unauthenticated)?;
        let url = format!("{}{}", self.config.base_url, path);

        debug!(%method, %url, "sending API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::Network)?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .map(|body| body.detail);
            return Err(ClientError::api(status.as_u16(), detail));
        }

        if bytes.is_empty() {
            Ok(serde_json::from_slice(b"null")?)
        } else {
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}
