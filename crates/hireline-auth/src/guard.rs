//! Redirect-to-login gate for protected surfaces.

use std::sync::Arc;

use tracing::debug;

use crate::provider::Identity;
use crate::session::Session;

/// Navigation sink the guard redirects through.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// What the hosting surface should show for the current session.
pub enum GuardDecision {
    /// Session unresolved or absent: show a neutral placeholder.
    Placeholder,
    /// Signed in: render the protected surface with this identity.
    Render(Arc<dyn Identity>),
}

impl GuardDecision {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, GuardDecision::Placeholder)
    }

    pub fn identity(&self) -> Option<&Arc<dyn Identity>> {
        match self {
            GuardDecision::Render(identity) => Some(identity),
            GuardDecision::Placeholder => None,
        }
    }
}

/// Guards one protected surface.
///
/// Never yields an identity while the session is loading, and redirects to
/// the login route exactly once per transition into the signed-out state. A
/// signed-in or loading observation re-arms the redirect so an expiring
/// session mid-use redirects again.
pub struct RouteGuard<N: Navigator> {
    navigator: N,
    login_route: String,
    redirected: bool,
    mounted: bool,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(navigator: N) -> Self {
        Self::with_login_route(navigator, "/login")
    }

    pub fn with_login_route(navigator: N, login_route: impl Into<String>) -> Self {
        Self {
            navigator,
            login_route: login_route.into(),
            redirected: false,
            mounted: true,
        }
    }

    /// Evaluate the current session. Call on every session change.
    pub fn evaluate(&mut self, session: &Session) -> GuardDecision {
        if !self.mounted {
            // The hosting surface is gone; late session updates are inert.
            return GuardDecision::Placeholder;
        }

        match session {
            Session::Loading => {
                self.redirected = false;
                GuardDecision::Placeholder
            }
            Session::SignedOut => {
                if !self.redirected {
                    debug!(route = %self.login_route, "redirecting unauthenticated visitor");
                    self.navigator.push(&self.login_route);
                    self.redirected = true;
                }
                GuardDecision::Placeholder
            }
            Session::SignedIn(identity) => {
                self.redirected = false;
                GuardDecision::Render(Arc::clone(identity))
            }
        }
    }

    /// Mark the hosting surface as torn down; later evaluations do nothing.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}
