//! Unified error type for Guidepost.

use guidepost_session::AuthError;
use guidepost_store::StoreError;
use guidepost_transport::TransportError;

/// A request body that couldn't be turned into a navigation document.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The body isn't JSON, or isn't shaped like a document.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GuidepostError {
    /// Login or token check failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Reading or writing the document file failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The submitted document couldn't be decoded.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The HTTP listener failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GuidepostError {
    /// The envelope `code` reported to clients for this error.
    pub fn code(&self) -> u16 {
        match self {
            GuidepostError::Auth(_) => 401,
            GuidepostError::Validation(_) => 400,
            GuidepostError::Store(_) | GuidepostError::Transport(_) => 500,
        }
    }

    /// The envelope `msg` reported to clients.
    ///
    /// Deliberately coarse: a client learns that its token is no good,
    /// not whether it was superseded, expired, or never issued.
    pub fn client_message(&self) -> &'static str {
        match self {
            GuidepostError::Auth(AuthError::BadCredential) => "wrong password",
            GuidepostError::Auth(_) => "session expired, please log in again",
            GuidepostError::Validation(_) => "invalid request body",
            GuidepostError::Store(_) => "failed to save document",
            GuidepostError::Transport(_) => "internal error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_auth_error_maps_to_401() {
        let err: GuidepostError = AuthError::TokenMismatch.into();

        assert!(matches!(err, GuidepostError::Auth(_)));
        assert_eq!(err.code(), 401);
        assert_eq!(err.client_message(), "session expired, please log in again");
    }

    #[test]
    fn test_bad_credential_has_its_own_message() {
        let err: GuidepostError = AuthError::BadCredential.into();

        assert_eq!(err.code(), 401);
        assert_eq!(err.client_message(), "wrong password");
    }

    #[test]
    fn test_from_validation_error_maps_to_400() {
        let err: GuidepostError =
            ValidationError::MalformedDocument("eof".into()).into();

        assert_eq!(err.code(), 400);
        assert!(err.to_string().contains("eof"));
    }

    #[test]
    fn test_from_store_error_maps_to_500() {
        let err: GuidepostError = StoreError::WriteFailed {
            path: "data.json".into(),
            source: std::io::Error::other("disk full"),
        }
        .into();

        assert_eq!(err.code(), 500);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_from_transport_error_maps_to_500() {
        let err: GuidepostError = TransportError::BindFailed(
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        )
        .into();

        assert_eq!(err.code(), 500);
    }
}
