//! The session authority: issues and checks the one live token.
//!
//! Responsibilities:
//! - Verifying a credential and minting a fresh token on success
//! - Discarding the previous token the instant a new one is minted
//! - Checking a presented token against the live one
//! - Enforcing the optional time-to-live
//!
//! # Concurrency note
//!
//! `SessionAuthority` is NOT thread-safe by itself. The server keeps it
//! behind a `tokio::sync::Mutex`, which makes `authenticate` and
//! `validate` atomic with respect to each other: a re-issue can never
//! slip in between reading the live token and comparing against it.

use rand::Rng;
use rand::distr::Alphanumeric;
use subtle::ConstantTimeEq;

use crate::{
    AuthError, CredentialVerifier, Session, SessionConfig, SessionState,
};

/// Owns the single live session.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ [NoSession]
///               │ authenticate(good)
///               ▼
///          [Active(t1)] ──authenticate(good)──→ [Active(t2)]
///               │                                    │
///          validate(t1) ok                  validate(t1) → TokenMismatch
/// ```
pub struct SessionAuthority<V> {
    /// Decides whether a credential is acceptable.
    verifier: V,

    /// Current state of the one-session state machine.
    state: SessionState,

    /// Token length and time-to-live.
    config: SessionConfig,
}

impl<V: CredentialVerifier> SessionAuthority<V> {
    /// Creates an authority with no live session.
    pub fn new(verifier: V, config: SessionConfig) -> Self {
        Self {
            verifier,
            state: SessionState::NoSession,
            config,
        }
    }

    /// Checks `credential` and, on success, mints a new token.
    ///
    /// Any previously issued token stops validating as soon as this
    /// returns `Ok`. On failure the current state is left untouched, so
    /// a wrong password never logs out the legitimate session.
    ///
    /// # Errors
    /// Returns [`AuthError::BadCredential`] if the verifier rejects the
    /// credential.
    pub fn authenticate(
        &mut self,
        credential: &str,
    ) -> Result<String, AuthError> {
        if !self.verifier.verify(credential) {
            tracing::warn!("login rejected: bad credential");
            return Err(AuthError::BadCredential);
        }

        let superseded = self.has_session();
        let token = generate_token(self.config.token_len);

        self.state = SessionState::Active(Session {
            token: token.clone(),
            issued_at: std::time::Instant::now(),
        });

        tracing::info!(superseded, "session issued");
        Ok(token)
    }

    /// Succeeds iff `token` is exactly the live token (and, when a TTL is
    /// configured, the live token hasn't outlived it).
    ///
    /// # Errors
    /// - [`AuthError::NoActiveSession`]: nobody has logged in yet
    /// - [`AuthError::TokenMismatch`]: wrong or superseded token
    /// - [`AuthError::SessionExpired`]: right token, but too old
    pub fn validate(&self, token: &str) -> Result<(), AuthError> {
        let session = match &self.state {
            SessionState::NoSession => {
                return Err(AuthError::NoActiveSession);
            }
            SessionState::Active(session) => session,
        };

        if !bool::from(session.token.as_bytes().ct_eq(token.as_bytes())) {
            return Err(AuthError::TokenMismatch);
        }

        if let Some(ttl) = self.config.ttl() {
            if session.is_expired(ttl) {
                return Err(AuthError::SessionExpired);
            }
        }

        Ok(())
    }

    /// Returns the current state (for inspection and tests).
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn has_session(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }
}

/// Generates a random alphanumeric token of `len` characters.
///
/// Each character is drawn independently from `[A-Za-z0-9]` using the
/// thread-local RNG, which is a cryptographically secure generator
/// seeded from the OS. At 10 characters that's ~59 bits per token.
fn generate_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

// =========================================================================
// Tests
// =========================================================================
