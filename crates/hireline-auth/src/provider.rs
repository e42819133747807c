//! Identity-provider seam.
//!
//! The session manager only sees these traits; the concrete Firebase
//! implementation lives in `firebase` and tests substitute fakes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AuthResult;

/// A signed-in principal able to mint ID tokens.
///
/// The provider owns the real credential state; holders of an `Identity` keep
/// a non-owning handle that stays valid for token minting until the provider
/// signs the principal out.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Stable user ID.
    fn uid(&self) -> &str;

    /// Account email, when known.
    fn email(&self) -> Option<&str>;

    /// Mint an ID token. `force_refresh` bypasses any provider-side cache.
    async fn id_token(&self, force_refresh: bool) -> AuthResult<String>;
}

/// One auth-state change. `identity` is `None` when signed out.
#[derive(Clone)]
pub struct AuthEvent {
    pub identity: Option<Arc<dyn Identity>>,
}

impl AuthEvent {
    pub fn signed_in(identity: Arc<dyn Identity>) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

/// The identity provider boundary.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Subscribe to auth-state changes. The current state is delivered
    /// immediately, then again on every sign-in or sign-out. Subscribers must
    /// not assume at most one event over their lifetime.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthEvent>;

    /// Sign the current principal out.
    async fn sign_out(&self) -> AuthResult<()>;
}
