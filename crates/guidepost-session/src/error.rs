//! Error types for the session layer.

/// Errors that can occur while logging in or checking a token.
///
/// None of these carry the submitted credential or token: error messages
/// end up in logs, and those values are secrets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The submitted credential doesn't match the configured secret.
    #[error("bad credential")]
    BadCredential,

    /// A token was presented but nobody has logged in since startup.
    #[error("no active session")]
    NoActiveSession,

    /// A session exists but the presented token isn't its token.
    /// This is also what a superseded token gets after a newer login.
    #[error("session token mismatch")]
    TokenMismatch,

    /// The presented token is the live one but has outlived the
    /// configured time-to-live.
    #[error("session expired")]
    SessionExpired,
}
