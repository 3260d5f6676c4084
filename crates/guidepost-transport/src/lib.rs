//! HTTP shell for Guidepost.
//!
//! Provides the [`Dispatch`] trait (the three operations the core
//! exposes), an axum [`router`] that maps HTTP verbs and paths onto it,
//! and [`HttpTransport`], the listening socket.
//!
//! # Routes
//!
//! | verb | path | operation |
//! |---|---|---|
//! | `GET` | `/home` | [`Dispatch::home`] |
//! | `GET` | `/login/{credential}` | [`Dispatch::login`] |
//! | `POST` | `/login` (`{"password": ...}`) | [`Dispatch::login`] |
//! | `POST` | `/save/{token}` | [`Dispatch::save`] |
//! | `GET` | `/`, `/static/{*file}` | static assets, see [`AssetConfig`] |
//!
//! `GET /login/{credential}` puts the password in the URL, where proxies
//! and access logs will record it. It's kept for existing dashboard
//! pages; new clients should use `POST /login`.

mod assets;
mod error;
mod http;

pub use assets::AssetConfig;
pub use error::TransportError;
pub use http::router;

use std::future::Future;
use std::net::SocketAddr;

use guidepost_protocol::{LoginGrant, NavigationDocument, Reply};
use tokio::net::TcpListener;

/// The operations the HTTP shell forwards to the core.
///
/// Every method answers with a [`Reply`] envelope, including failures:
/// the shell always responds `200 OK` and lets `code` carry the result.
///
/// Methods return `impl Future + Send` rather than being `async fn` so
/// that axum can run them on any worker thread. Implementors can still
/// write `async fn`.
pub trait Dispatch: Send + Sync + 'static {
    /// Returns the current document. Never requires a token.
    fn home(&self) -> impl Future<Output = Reply<NavigationDocument>> + Send;

    /// Checks `credential` and returns a fresh session token.
    fn login(
        &self,
        credential: &str,
    ) -> impl Future<Output = Reply<LoginGrant>> + Send;

    /// Replaces the document with `body` if `token` is the live token.
    ///
    /// `body` is the raw request body; decoding it is the core's job so
    /// that a malformed body becomes a `400` envelope, not a transport
    /// rejection.
    fn save(
        &self,
        token: &str,
        body: &[u8],
    ) -> impl Future<Output = Reply<NavigationDocument>> + Send;
}

/// A bound TCP listener ready to serve a [`router`].
pub struct HttpTransport {
    listener: TcpListener,
}

impl HttpTransport {
    /// Binds to the given address (`"0.0.0.0:8080"`, `"127.0.0.1:0"`, ...).
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::BindFailed)?;
        tracing::info!(addr, "HTTP transport listening");
        Ok(Self { listener })
    }

    /// Returns the address actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves `router` until the process exits.
    pub async fn serve(self, router: axum::Router) -> Result<(), TransportError> {
        axum::serve(self.listener, router)
            .await
            .map_err(TransportError::ServeFailed)
    }

    /// Serves `router` until `shutdown` resolves, then stops accepting
    /// and lets in-flight requests finish.
    pub async fn serve_until<F>(
        self,
        router: axum::Router,
        shutdown: F,
    ) -> Result<(), TransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(TransportError::ServeFailed)
    }
}
