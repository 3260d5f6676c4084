//! `GuidepostServer` builder and server loop.
//!
//! Ties the layers together: HTTP transport → dispatch → session gate →
//! document store.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use guidepost_session::{CredentialVerifier, SessionAuthority, SessionConfig};
use guidepost_store::DocumentStore;
use guidepost_transport::{AssetConfig, HttpTransport, router};

use crate::handler::ServerState;
use crate::{GuidepostError, ServerConfig};

/// Builder for configuring and starting a Guidepost server.
///
/// # Example
///
/// ```rust,no_run
/// use guidepost::prelude::*;
///
/// # async fn start() -> Result<(), GuidepostError> {
/// let server = GuidepostServer::builder()
///     .bind("127.0.0.1:8080")
///     .data_file("nav.json")
///     .title("My Links")
///     .build(PasswordVerifier::new("s3cret"))
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct GuidepostServerBuilder {
    bind_addr: String,
    data_file: PathBuf,
    title: String,
    assets_dir: Option<PathBuf>,
    session_config: SessionConfig,
}

impl GuidepostServerBuilder {
    /// Creates a new builder from [`ServerConfig::default`].
    pub fn new() -> Self {
        Self::from_config(&ServerConfig::default())
    }

    fn from_config(config: &ServerConfig) -> Self {
        Self {
            bind_addr: config.bind_addr(),
            data_file: config.data_file.clone(),
            title: config.title.clone(),
            assets_dir: config.assets_dir.clone(),
            session_config: config.session.clone(),
        }
    }

    /// Takes every setting except the password from `config`.
    pub fn config(self, config: &ServerConfig) -> Self {
        Self::from_config(config)
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the path of the document file.
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the title written into the document at startup.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Serves the dashboard page from `dir`.
    pub fn assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Loads the document, stamps the title, and binds the listener.
    ///
    /// # Errors
    /// - [`GuidepostError::Store`] if the retitled document can't be
    ///   written. An unwritable data file is fatal at boot rather than
    ///   on the first save.
    /// - [`GuidepostError::Transport`] if the address can't be bound.
    pub async fn build<V: CredentialVerifier>(
        self,
        verifier: V,
    ) -> Result<GuidepostServer<V>, GuidepostError> {
        let mut store = DocumentStore::open(&self.data_file).await;
        store.set_title(self.title.clone()).await?;

        let transport = HttpTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState::new(
            SessionAuthority::new(verifier, self.session_config),
            store,
        ));

        let assets = self.assets_dir.map(|dir| AssetConfig {
            dir,
            title: self.title,
        });

        Ok(GuidepostServer {
            transport,
            state,
            assets,
        })
    }
}

impl Default for GuidepostServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Guidepost server.
///
/// Call [`run()`](Self::run) to start answering requests.
pub struct GuidepostServer<V> {
    transport: HttpTransport,
    state: Arc<ServerState<V>>,
    assets: Option<AssetConfig>,
}

impl GuidepostServer<guidepost_session::PasswordVerifier> {
    /// Creates a new builder.
    ///
    /// The builder isn't tied to a verifier type; [`build`] picks it, so
    /// `GuidepostServer::builder().build(my_verifier)` works for any
    /// [`CredentialVerifier`]. This constructor sits on the
    /// `PasswordVerifier` instantiation only so the call needs no type
    /// annotation.
    ///
    /// [`build`]: GuidepostServerBuilder::build
    pub fn builder() -> GuidepostServerBuilder {
        GuidepostServerBuilder::new()
    }
}

impl<V: CredentialVerifier> GuidepostServer<V> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Shared state, for driving the core operations without HTTP.
    pub fn state(&self) -> Arc<ServerState<V>> {
        Arc::clone(&self.state)
    }

    /// Serves requests until the process is terminated.
    pub async fn run(self) -> Result<(), GuidepostError> {
        tracing::info!("Guidepost server running");
        let app = router(self.state, self.assets);
        self.transport.serve(app).await?;
        Ok(())
    }

    /// Serves requests until `shutdown` resolves, then drains in-flight
    /// requests and returns.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), GuidepostError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Guidepost server running");
        let app = router(self.state, self.assets);
        self.transport.serve_until(app, shutdown).await?;
        tracing::info!("Guidepost server stopped");
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
