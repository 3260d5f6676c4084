//! Credential verification hook.
//!
//! The session authority doesn't know what a "credential" is. It asks a
//! [`CredentialVerifier`] and only cares about the yes/no answer. This
//! keeps the state machine independent of how the credential reaches the
//! server (URL path today, request body tomorrow) and of what it's
//! checked against.

use subtle::ConstantTimeEq;

/// Decides whether a submitted credential is acceptable.
///
/// # Trait bounds
///
/// - `Send + Sync` → the verifier lives inside shared server state and is
///   reached from many request handlers.
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the server.
///
/// # Example
///
/// ```rust
/// use guidepost_session::CredentialVerifier;
///
/// /// Accepts anything. Only for local experiments!
/// struct OpenDoor;
///
/// impl CredentialVerifier for OpenDoor {
///     fn verify(&self, _credential: &str) -> bool {
///         true
///     }
/// }
/// ```
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Returns `true` if `credential` should be granted a session.
    fn verify(&self, credential: &str) -> bool;
}

/// Checks the credential against one configured password by exact
/// string match.
///
/// No trimming, no case folding: `"123456 "` is not `"123456"`.
#[derive(Clone)]
pub struct PasswordVerifier {
    password: String,
}

impl PasswordVerifier {
    /// Creates a verifier for the given secret.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

/// Hand-written so the secret never shows up in `{:?}` output.
impl std::fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordVerifier")
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for PasswordVerifier {
    fn verify(&self, credential: &str) -> bool {
        bool::from(credential.as_bytes().ct_eq(self.password.as_bytes()))
    }
}
