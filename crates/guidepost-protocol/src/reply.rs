//! The `{code, msg, data}` envelope every endpoint answers with.
//!
//! Failures are modeled as data, not as HTTP status codes: the transport
//! always answers `200 OK`, and the envelope's `code` says what actually
//! happened (200, 400, 401, 500). The dashboard page branches on `code`.

use serde::{Deserialize, Serialize};

/// Envelope `code` for a successful operation.
pub const CODE_OK: u16 = 200;

/// A reply envelope carrying an optional payload.
///
/// `data` is `null` on every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply<T> {
    /// HTTP-style result code (200 = ok, 400 = bad request,
    /// 401 = unauthorized, 500 = server failure).
    pub code: u16,

    /// Human-readable message for the page to show.
    pub msg: String,

    /// The payload, present only when `code` is 200.
    pub data: Option<T>,
}

impl<T> Reply<T> {
    /// A successful reply carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    /// A failed reply with no payload.
    pub fn failure(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Payload of a successful login: the freshly minted session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    pub token: String,
}

/// Body of `POST /login`.
///
/// Carries the credential in the request body instead of the URL, so it
/// stays out of access logs and browser history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}
