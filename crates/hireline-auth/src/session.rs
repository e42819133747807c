//! Auth-event driven session state.
//!
//! The session moves from `Loading` to either `SignedIn` or `SignedOut` on
//! the first provider event and follows every event after that. All token
//! side effects are funneled through a single reducer so each transition is
//! testable on its own, and an atomic generation counter discards async
//! results that complete after the identity they belong to was superseded.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::provider::{AuthEvent, AuthProvider, Identity};
use crate::token_store::TokenStore;

/// Current session state.
#[derive(Clone)]
pub enum Session {
    /// Waiting for the first auth event.
    Loading,
    /// A principal is signed in.
    SignedIn(Arc<dyn Identity>),
    /// Resolved with no principal.
    SignedOut,
}

impl Session {
    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Loading)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }

    pub fn is_signed_out(&self) -> bool {
        matches!(self, Session::SignedOut)
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Arc<dyn Identity>> {
        match self {
            Session::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Loading => write!(f, "Session::Loading"),
            Session::SignedIn(identity) => write!(f, "Session::SignedIn({})", identity.uid()),
            Session::SignedOut => write!(f, "Session::SignedOut"),
        }
    }
}

/// Result of processing one auth event, after any token mint has settled.
pub(crate) enum EventOutcome {
    /// Signed-in event and the mint succeeded.
    TokenMinted {
        identity: Arc<dyn Identity>,
        token: String,
    },
    /// Signed-in event but the provider refused to mint. The session degrades
    /// to signed-out rather than surfacing a half-authenticated state.
    TokenFetchFailed,
    /// Signed-out event.
    SignedOut,
}

/// Token-store side effect of a transition.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum StoreEffect {
    Put(String),
    Clear,
}

/// Pure transition function: every session change and its token side effect
/// in one place.
pub(crate) fn reduce(outcome: EventOutcome) -> (Session, StoreEffect) {
    match outcome {
        EventOutcome::TokenMinted { identity, token } => {
            (Session::SignedIn(identity), StoreEffect::Put(token))
        }
        EventOutcome::TokenFetchFailed => (Session::SignedOut, StoreEffect::Clear),
        EventOutcome::SignedOut => (Session::SignedOut, StoreEffect::Clear),
    }
}

struct Inner {
    provider: Arc<dyn AuthProvider>,
    store: Arc<TokenStore>,
    state: watch::Sender<Session>,
    /// Bumped on every auth event and logout. Async completions compare the
    /// generation they captured before touching shared state.
    generation: AtomicU64,
}

/// Owns the session state machine.
///
/// Cheap to clone; all clones share one session.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn AuthProvider>, store: Arc<TokenStore>) -> Self {
        let (state, _) = watch::channel(Session::Loading);
        Self {
            inner: Arc::new(Inner {
                provider,
                store,
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to the provider and apply its events in arrival order until
    /// the provider drops its side of the stream.
    pub fn start(&self) -> JoinHandle<()> {
        let mut events = self.inner.provider.subscribe();
        let manager = self.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                manager.handle_event(event).await;
            }
            debug!("auth event stream closed");
        })
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Watch session changes; used by route guards and other observers.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Shared token store read by the HTTP client.
    pub fn token_store(&self) -> Arc<TokenStore> {
        Arc::clone(&self.inner.store)
    }

    /// Apply one auth event. Public so callers without a provider stream can
    /// drive the state machine directly.
    pub async fn handle_event(&self, event: AuthEvent) {
        let generation = self.bump_generation();

        let outcome = match event.identity {
            Some(identity) => match identity.id_token(false).await {
                Ok(token) => EventOutcome::TokenMinted { identity, token },
                Err(e) => {
                    warn!(error = %e, "token mint failed, degrading to signed-out");
                    EventOutcome::TokenFetchFailed
                }
            },
            None => EventOutcome::SignedOut,
        };

        // A later event or logout superseded this one while the mint was in
        // flight; its results must not touch the store or the session.
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding superseded auth event result");
            return;
        }

        let (session, effect) = reduce(outcome);
        self.apply_effect(effect);
        self.inner.state.send_replace(session);
    }

    /// Mint a fresh token for the current identity.
    ///
    /// Always re-derives from the identity rather than trusting the cache;
    /// the token store is only refreshed when this call's identity is still
    /// the current one by the time the mint settles. Returns `None` while
    /// loading, when signed out, when the mint fails, or when the session
    /// changed underneath the call.
    pub async fn session_token(&self) -> Option<String> {
        let identity = self.session().identity().cloned()?;

        match identity.id_token(false).await {
            Ok(token) => {
                // Completion-time check against the identity itself: the
                // minting identity must still be the signed-in one, or the
                // result belongs to a superseded session and is dropped.
                match self.session().identity() {
                    Some(current) if Arc::ptr_eq(current, &identity) => {
                        self.inner.store.set(&token);
                        Some(token)
                    }
                    _ => {
                        debug!("discarding token minted for a superseded identity");
                        None
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "token mint failed");
                None
            }
        }
    }

    /// Sign out. The local session always ends signed-out with an empty token
    /// store, whether or not the provider's sign-out succeeded.
    pub async fn logout(&self) {
        self.bump_generation();
        self.inner.state.send_replace(Session::Loading);
        self.inner.store.clear();

        if let Err(e) = self.inner.provider.sign_out().await {
            warn!(error = %e, "provider sign-out failed, clearing local session anyway");
        }

        self.bump_generation();
        self.inner.store.clear();
        self.inner.state.send_replace(Session::SignedOut);
    }

    fn bump_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply_effect(&self, effect: StoreEffect) {
        match effect {
            StoreEffect::Put(token) => self.inner.store.set(&token),
            StoreEffect::Clear => self.inner.store.clear(),
        }
    }
}
