//! # Guidepost
//!
//! A personal navigation page server: one JSON document of tabbed links,
//! readable by anyone, writable by whoever holds the single live session
//! token.
//!
//! The crate wires together the layers below it:
//!
//! | crate | role |
//! |---|---|
//! | `guidepost-protocol` | document types, reply envelope, JSON codec |
//! | `guidepost-session` | password check and the one live token |
//! | `guidepost-store` | the document file, loaded fail-open and saved atomically |
//! | `guidepost-transport` | axum routes and the TCP listener |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guidepost::prelude::*;
//!
//! # async fn start() -> Result<(), GuidepostError> {
//! let server = GuidepostServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .data_file("data.json")
//!     .build(PasswordVerifier::new("123456"))
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use error::{GuidepostError, ValidationError};
pub use handler::ServerState;
pub use server::{GuidepostServer, GuidepostServerBuilder};

/// Everything needed to start a server.
pub mod prelude {
    pub use crate::{
        GuidepostError, GuidepostServer, GuidepostServerBuilder, ServerConfig,
        ServerState,
    };
    pub use guidepost_protocol::{Guide, NavigationDocument, Tab};
    pub use guidepost_session::{
        AuthError, CredentialVerifier, PasswordVerifier, SessionConfig,
    };
}
