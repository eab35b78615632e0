//! Auth state tracking for the single per-process session.

use common::SessionToken;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use log::{info, warn};

/// The per-process session: a token and when it was issued.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub issued_at: SystemTime,
}

impl Session {
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            issued_at: SystemTime::now(),
        }
    }

    /// Issue a fresh random session.
    pub fn generate() -> Self {
        Self::new(SessionToken::generate())
    }
}

/// Where the process is in the login handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    /// Terminal until the process exits.
    Authenticated,
}

/// Validates login tokens and session cookies against the process's session.
#[derive(Debug)]
pub struct AuthGate {
    session: Session,
    authenticated: AtomicBool,
}

impl AuthGate {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            authenticated: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> &SessionToken {
        &self.session.token
    }

    pub fn state(&self) -> AuthState {
        if self.authenticated.load(Ordering::SeqCst) {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Validate a token submitted to the login endpoint.
    ///
    /// Returns true and moves to [`AuthState::Authenticated`] on an exact
    /// match; a mismatch changes nothing.
    pub fn login(&self, supplied: &str) -> bool {
        if self.session.token.matches(supplied) {
            if !self.authenticated.swap(true, Ordering::SeqCst) {
                info!("Browser session authenticated");
            }
            true
        } else {
            warn!("Login rejected: invalid token");
            false
        }
    }

    /// Check the session cookie carried by a data request.
    pub fn is_authorized(&self, cookie: Option<&str>) -> bool {
        cookie.is_some_and(|value| self.session.token.matches(value))
    }
}
