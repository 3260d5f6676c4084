//! Startup configuration, consumed once at boot.

use std::fmt;
use std::path::PathBuf;

use guidepost_session::SessionConfig;

/// Everything the server needs to know before it starts.
///
/// ```rust
/// use guidepost::ServerConfig;
///
/// let config = ServerConfig {
///     password: "s3cret".into(),
///     port: 9000,
///     ..ServerConfig::default()
/// };
/// assert_eq!(config.bind_addr(), "0.0.0.0:9000");
/// ```
#[derive(Clone)]
pub struct ServerConfig {
    /// The one password that grants a write session.
    pub password: String,

    /// Path of the JSON document file.
    pub data_file: PathBuf,

    /// Page title; overwrites the document's title at every boot.
    pub title: String,

    /// Interface to listen on.
    pub host: String,

    /// TCP port to listen on (0 = let the OS pick).
    pub port: u16,

    /// Directory with `index.html` and `static/`; `None` serves the API only.
    pub assets_dir: Option<PathBuf>,

    /// Token length and optional time-to-live.
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            password: "123456".to_string(),
            data_file: PathBuf::from("data.json"),
            title: "Guidepost".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            assets_dir: None,
            session: SessionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hand-written so the password never shows up in logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("password", &"<redacted>")
            .field("data_file", &self.data_file)
            .field("title", &self.title)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("assets_dir", &self.assets_dir)
            .field("session", &self.session)
            .finish()
    }
}
