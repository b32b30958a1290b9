//! Client-side session lifecycle.
//!
//! ```text
//!              init(), token stored        verify ok
//!   Unknown ───────────────────────▶ Verifying ─────────▶ Authenticated
//!      │                                 │                   ▲     │
//!      │ init(), no token                │ verify failed     │     │ logout()
//!      ▼                                 ▼ (token dropped)   │     ▼
//!   Unauthenticated ◀────────────────────┘                   │  Unauthenticated
//!      │                  login() ok (token stored)          │
//!      └─────────────────────────────────────────────────────┘
//! ```
//!
//! The session is the only writer of the stored credential. The API client
//! reads it on every request, so the order of writes here is all that keeps
//! requests correctly authenticated.

use super::credentials::CredentialStore;
use super::user::User;
use crate::api::ApiClient;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `init()` has not run yet.
    Unknown,
    /// A stored credential is being checked against the server.
    Verifying,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug)]
pub struct SessionStore {
    api: ApiClient,
    credentials: Arc<dyn CredentialStore>,
    state: SessionState,
    user: Option<User>,
}

impl SessionStore {
    /// Creates an empty session sharing the client's credential store.
    pub fn new(api: &ApiClient) -> Self {
        Self {
            api: api.clone(),
            credentials: api.credentials(),
            state: SessionState::Unknown,
            user: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated && self.user.is_some()
    }

    /// True until the startup verification has finished.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Unknown | SessionState::Verifying)
    }

    /// Restores the session from a stored credential, if any.
    ///
    /// Any verification failure, including a network error, drops the
    /// stored credential and ends unauthenticated. Calling `init()` on a
    /// session that already left `Unknown` does nothing.
    pub async fn init(&mut self) -> SessionState {
        if self.state != SessionState::Unknown {
            return self.state;
        }
        if self.credentials.load().is_none() {
            debug!("no stored credential");
            self.state = SessionState::Unauthenticated;
            return self.state;
        }

        self.state = SessionState::Verifying;
        match self.api.current_user().await {
            Ok(user) => {
                debug!(username = %user.username, "stored credential accepted");
                self.user = Some(user);
                self.state = SessionState::Authenticated;
            }
            Err(err) => {
                warn!(error = %err, "stored credential rejected");
                self.discard_credential();
                self.user = None;
                self.state = SessionState::Unauthenticated;
            }
        }
        self.state
    }

    /// Forgets the in-memory session. The stored credential is kept so the
    /// next `init()` can restore it.
    pub fn dispose(&mut self) {
        self.user = None;
        self.state = SessionState::Unknown;
    }

    /// Logs in and stores the returned credential.
    ///
    /// Returns `false` on any failure and leaves the session untouched; the
    /// caller decides what to tell the user.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        let data = match self.api.login(username, password).await {
            Ok(data) => data,
            Err(err) => {
                warn!(username, error = %err, "login failed");
                return false;
            }
        };
        if let Err(err) = self.credentials.save(&data.token) {
            warn!(error = %err, "could not store credential");
            return false;
        }
        info!(username = %data.user.username, "logged in");
        self.user = Some(data.user);
        self.state = SessionState::Authenticated;
        true
    }

    /// Registers a new account. The session is not changed; a separate
    /// login is needed afterwards.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> bool {
        match self.api.signup(username, email, password).await {
            Ok(()) => true,
            Err(err) => {
                warn!(username, error = %err, "signup failed");
                false
            }
        }
    }

    /// Ends the session. The server is told first, while the credential is
    /// still attached, but local state is cleared whatever it answers.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            warn!(error = %err, "remote logout failed, clearing local session anyway");
        }
        self.discard_credential();
        self.user = None;
        self.state = SessionState::Unauthenticated;
    }

    fn discard_credential(&self) {
        if let Err(err) = self.credentials.clear() {
            warn!(error = %err, "could not remove stored credential");
        }
    }
}
