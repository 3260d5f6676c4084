//! Document storage for Guidepost.
//!
//! Owns the one [`NavigationDocument`](guidepost_protocol::NavigationDocument)
//! the server serves: loads it from a JSON file at startup, keeps the
//! in-memory copy, and rewrites the file on every accepted save.
//!
//! # Policies
//!
//! - **Fail-open load**: a missing, unreadable, or malformed file yields
//!   an empty document instead of an error. The substitution is logged.
//! - **Fail-loud save**: a failed write is returned to the caller, and
//!   the in-memory copy is left unchanged so memory and disk agree.
//! - **Full replace**: no partial updates, no merging. The last save wins.

mod error;
mod store;

pub use error::StoreError;
pub use store::DocumentStore;
