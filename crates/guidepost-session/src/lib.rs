//! Session authority for Guidepost.
//!
//! This crate decides who may write the navigation document:
//!
//! 1. **Credential check**: is the submitted password right?
//!    ([`CredentialVerifier`] trait, [`PasswordVerifier`])
//! 2. **Token issue**: mint one session token, discarding any older one
//!    ([`SessionAuthority::authenticate`])
//! 3. **Token check**: does a write request carry the live token?
//!    ([`SessionAuthority::validate`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Dispatcher (above)  ← calls authenticate() on login, validate() on save
//!     ↕
//! Session Layer (this crate)  ← owns the one live token
//! ```
//!
//! There is no I/O here. The authority is plain state behind a lock the
//! caller owns, which keeps it trivially testable.

mod auth;
mod error;
mod manager;
mod session;

pub use auth::{CredentialVerifier, PasswordVerifier};
pub use error::AuthError;
pub use manager::SessionAuthority;
pub use session::{Session, SessionConfig, SessionState};
