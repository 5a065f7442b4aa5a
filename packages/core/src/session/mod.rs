//! Session Lifecycle
//!
//! Explicit session state over an external auth provider, passed to the
//! admin services by injection. There is no ambient global auth state:
//! the application constructs one `SessionManager` at startup, signs in
//! and out through it, and tears the session down on sign-out.
//!
//! The auth provider itself (credential checking, token issuance) is an
//! external collaborator behind the [`AuthProvider`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Auth operation errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credentials rejected by the provider
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Provider could not be reached
    #[error("Auth provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Operation requires an active session and none exists
    #[error("No active session")]
    NoSession,
}

/// Sign-in credentials forwarded to the auth provider
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Identity returned by a successful authentication
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Provider-assigned user id
    pub user_id: String,
    /// Verified email address
    pub email: String,
    /// Opaque access token, revoked at sign-out
    pub token: String,
}

/// External authentication collaborator
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and issue a token
    async fn authenticate(&self, credentials: &Credentials)
        -> Result<AuthenticatedUser, AuthError>;

    /// Revoke a previously issued token
    async fn revoke(&self, token: &str) -> Result<(), AuthError>;
}

/// An authenticated admin session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
    pub started_at: DateTime<Utc>,
}

/// Owns the current session and its lifecycle
///
/// Constructed once at application start; admin services receive it by
/// injection and call [`require_admin`](Self::require_admin) before
/// mutating content.
pub struct SessionManager {
    provider: Arc<dyn AuthProvider>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Initialize with no active session (app start)
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            current: RwLock::new(None),
        }
    }

    /// Authenticate and establish the session
    ///
    /// A successful sign-in replaces any existing session.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let user = self.provider.authenticate(credentials).await?;

        let session = Session {
            user_id: user.user_id,
            email: user.email,
            token: user.token,
            started_at: Utc::now(),
        };

        tracing::debug!("Session started for {}", session.email);
        *self.current.write().await = Some(session.clone());

        Ok(session)
    }

    /// Tear down the current session, revoking its token
    ///
    /// Idempotent: signing out without a session is a no-op. The local
    /// session is cleared even if revocation fails, so a flaky provider
    /// cannot pin a session alive.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let session = self.current.write().await.take();

        if let Some(session) = session {
            tracing::debug!("Session ended for {}", session.email);
            self.provider.revoke(&session.token).await?;
        }

        Ok(())
    }

    /// Current session, if signed in
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Current session, or `AuthError::NoSession`
    pub async fn require_admin(&self) -> Result<Session, AuthError> {
        self.current
            .read()
            .await
            .clone()
            .ok_or(AuthError::NoSession)
    }
}
