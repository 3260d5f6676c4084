//! Session types: the data structures behind the one live login.
//!
//! A "session" is the server's record of a successful password check.
//! It tracks:
//! - WHAT token proves it (a random alphanumeric string)
//! - WHEN it was issued (so an optional time-to-live can be enforced)

use std::fmt;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// Sensible defaults are provided: 10-character tokens that never expire
/// on their own (a newer login is the only thing that invalidates one).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of characters in a minted token.
    ///
    /// Default: 10.
    pub token_len: usize,

    /// How long (in seconds) a token stays valid after it was issued.
    ///
    /// Default: `None`, meaning tokens live until superseded.
    pub token_ttl_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_len: 10,
            token_ttl_secs: None,
        }
    }
}

impl SessionConfig {
    pub(crate) fn ttl(&self) -> Option<Duration> {
        self.token_ttl_secs.map(Duration::from_secs)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The record of one successful login.
#[derive(Clone)]
pub struct Session {
    /// The secret the client presents on every write.
    pub token: String,

    /// When the token was minted. `Instant` is monotonic, so wall-clock
    /// adjustments can't resurrect or kill a session.
    pub issued_at: Instant,
}

impl Session {
    /// Returns `true` if the session has lived at least `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.issued_at.elapsed() >= ttl
    }
}

/// The token is a secret, so `{:?}` only shows how old the session is.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The authority's state machine.
///
/// ```text
///   NoSession ──(authenticate ok)──→ Active(t1) ──(authenticate ok)──→ Active(t2)
///                                        │                                 │
///                                 (authenticate fails: stays)   (t1 is now dead)
/// ```
///
/// There is no transition back to `NoSession`: there's no logout.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nobody has logged in since startup.
    #[default]
    NoSession,

    /// Exactly one token is live.
    Active(Session),
}
