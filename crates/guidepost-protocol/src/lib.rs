//! Wire and storage format for Guidepost.
//!
//! This crate defines the shapes that both the HTTP clients and the
//! on-disk file agree on:
//!
//! - **Types** ([`NavigationDocument`], [`Tab`], [`Guide`]): the whole
//!   navigation tree, persisted as one JSON document.
//! - **Replies** ([`Reply`], [`LoginGrant`], [`LoginRequest`]): the
//!   `{code, msg, data}` envelope every endpoint answers with.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those types are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about sessions, files, or sockets.
//! The store uses it to read and write the document file, and the
//! transport uses it to shape HTTP bodies.
//!
//! ```text
//! Transport (HTTP body) ─┐
//!                        ├─→ Protocol (NavigationDocument, Reply)
//! Store (file bytes) ────┘
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod reply;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use reply::{CODE_OK, LoginGrant, LoginRequest, Reply};
pub use types::{Guide, NavigationDocument, Tab};
