//! Session lifecycle, token cache and Firebase authentication.
//!
//! This crate provides:
//! - `TokenStore`: the process-wide ID-token cache with durable persistence
//! - `SessionManager`: auth-event driven session state with stale-result
//!   protection
//! - `AuthProvider`/`Identity`: the identity-provider seam, with a Firebase
//!   Identity Toolkit implementation
//! - `RouteGuard`: the redirect-to-login gate for protected surfaces

pub mod error;
pub mod firebase;
pub mod guard;
pub mod provider;
pub mod session;
pub mod token_store;

pub use error::{AuthError, AuthResult};
pub use firebase::{FirebaseAuth, FirebaseConfig, FirebaseIdentity};
pub use guard::{GuardDecision, Navigator, RouteGuard};
pub use provider::{AuthEvent, AuthProvider, Identity};
pub use session::{Session, SessionManager};
pub use token_store::{FilePersistence, TokenPersistence, TokenStore};
