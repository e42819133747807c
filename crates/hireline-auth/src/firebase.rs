//! Firebase Authentication over the Identity Toolkit REST API.
//!
//! Email/password sign-in goes through `accounts:signInWithPassword`; minted
//! ID tokens are cached per identity and refreshed through the secure-token
//! endpoint with an expiry margin, so callers on the hot path rarely pay for
//! a network round trip.

use std::sync::{Arc, Mutex, RwLock as StdRwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::error::{AuthError, AuthResult};
use crate::provider::{AuthEvent, AuthProvider, Identity};

/// Identity Toolkit endpoint.
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Secure-token endpoint used for ID-token refresh.
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Refresh margin: mint a new token 60 seconds before expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Fallback TTL when the endpoint omits a usable `expires_in`.
/// Firebase ID tokens are valid for 60 minutes.
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Firebase project configuration.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project
    pub api_key: String,
    /// Identity Toolkit base URL (overridable for tests)
    pub identity_url: String,
    /// Secure-token base URL (overridable for tests)
    pub token_url: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: IDENTITY_TOOLKIT_URL.to_string(),
            token_url: SECURE_TOKEN_URL.to_string(),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("FIREBASE_API_KEY")
            .map_err(|_| AuthError::config("FIREBASE_API_KEY must be set"))?;
        if api_key.is_empty() {
            return Err(AuthError::config("FIREBASE_API_KEY cannot be empty"));
        }

        Ok(Self {
            api_key,
            identity_url: std::env::var("FIREBASE_IDENTITY_URL")
                .unwrap_or_else(|_| IDENTITY_TOOLKIT_URL.to_string()),
            token_url: std::env::var("FIREBASE_SECURE_TOKEN_URL")
                .unwrap_or_else(|_| SECURE_TOKEN_URL.to_string()),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

/// Firebase auth provider.
///
/// Emits an auth event to every subscriber on sign-in and sign-out; a new
/// subscriber receives the current state immediately.
pub struct FirebaseAuth {
    http: Client,
    config: FirebaseConfig,
    current: StdRwLock<Option<Arc<FirebaseIdentity>>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
}

impl FirebaseAuth {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            current: StdRwLock::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> AuthResult<Self> {
        Ok(Self::new(FirebaseConfig::from_env()?))
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<Arc<FirebaseIdentity>> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            self.config.identity_url, self.config.api_key
        );

        debug!(%email, "signing in via identity toolkit");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("sign-in failed with status {}", status.as_u16()));
            return if status.is_client_error() {
                Err(AuthError::invalid_credentials(message))
            } else {
                Err(AuthError::token_fetch(message))
            };
        }

        let body: SignInResponse = response.json().await?;
        let identity = Arc::new(FirebaseIdentity {
            uid: body.local_id,
            email: body.email,
            http: self.http.clone(),
            api_key: self.config.api_key.clone(),
            token_url: self.config.token_url.clone(),
            tokens: RwLock::new(TokenState::new(
                body.id_token,
                body.refresh_token,
                &body.expires_in,
            )),
        });

        *self.current.write().unwrap() = Some(Arc::clone(&identity));
        self.notify(Some(Arc::clone(&identity)));

        Ok(identity)
    }

    /// Currently signed-in identity, if any.
    pub fn current_identity(&self) -> Option<Arc<FirebaseIdentity>> {
        self.current.read().unwrap().clone()
    }

    fn notify(&self, identity: Option<Arc<FirebaseIdentity>>) {
        let event = AuthEvent {
            identity: identity.map(|i| i as Arc<dyn Identity>),
        };
        // Drop subscribers whose receiving side is gone.
        self.subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        // Hold the subscriber lock across the snapshot, the initial send and
        // the registration: a sign-in landing in between would otherwise be
        // delivered to every subscriber but this one.
        let mut subscribers = self.subscribers.lock().unwrap();
        let current = self.current_identity();
        let _ = tx.send(AuthEvent {
            identity: current.map(|i| i as Arc<dyn Identity>),
        });
        subscribers.push(tx);
        rx
    }

    async fn sign_out(&self) -> AuthResult<()> {
        // Firebase client sign-out is local: drop the credential state and
        // tell subscribers. Refresh tokens stay valid server-side.
        *self.current.write().unwrap() = None;
        self.notify(None);
        Ok(())
    }
}

#[derive(Debug)]
struct TokenState {
    id_token: String,
    refresh_token: String,
    expires_at: Instant,
}

impl TokenState {
    fn new(id_token: String, refresh_token: String, expires_in: &str) -> Self {
        let ttl = expires_in
            .parse::<u64>()
            .map(Duration::from_secs)
            .unwrap_or(TOKEN_DEFAULT_TTL);
        Self {
            id_token,
            refresh_token,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Still valid with the refresh margin applied.
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// A signed-in Firebase principal.
#[derive(Debug)]
pub struct FirebaseIdentity {
    uid: String,
    email: Option<String>,
    http: Client,
    api_key: String,
    token_url: String,
    tokens: RwLock<TokenState>,
}

impl FirebaseIdentity {
    async fn refresh(&self, tokens: &mut TokenState) -> AuthResult<String> {
        let url = format!("{}/token?key={}", self.token_url, self.api_key);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", tokens.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("token refresh failed with status {}", status.as_u16()));
            return Err(AuthError::token_fetch(message));
        }

        let body: RefreshResponse = response.json().await?;
        *tokens = TokenState::new(body.id_token.clone(), body.refresh_token, &body.expires_in);

        debug!(uid = %self.uid, "refreshed Firebase ID token");
        Ok(body.id_token)
    }
}

#[async_trait]
impl Identity for FirebaseIdentity {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    async fn id_token(&self, force_refresh: bool) -> AuthResult<String> {
        // Fast path: cached token still fresh.
        if !force_refresh {
            let tokens = self.tokens.read().await;
            if tokens.is_fresh() {
                return Ok(tokens.id_token.clone());
            }
        }

        let mut tokens = self.tokens.write().await;

        // Another caller may have refreshed while we waited for the lock.
        if !force_refresh && tokens.is_fresh() {
            return Ok(tokens.id_token.clone());
        }

        self.refresh(&mut tokens).await.map_err(|e| {
            warn!(uid = %self.uid, error = %e, "ID token refresh failed");
            e
        })
    }
}
