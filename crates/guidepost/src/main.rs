//! `guidepost` binary: parse flags, install logging, serve until Ctrl-C.

use std::path::PathBuf;

use clap::Parser;
use guidepost::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// No `Debug` derive: the password must not end up in logs.
/// Serve a personal navigation page.
#[derive(Parser)]
#[command(name = "guidepost", version, about, long_about = None)]
struct Args {
    /// Path of the JSON document file
    #[arg(short = 'f', long = "file", default_value = "data.json")]
    file: PathBuf,

    /// Page title, written into the document at startup
    #[arg(short = 't', long = "title", default_value = "Guidepost")]
    title: String,

    /// Password that grants a write session
    #[arg(long = "pwd", visible_alias = "password", default_value = "123456")]
    password: String,

    /// TCP port to listen on
    #[arg(short = 'p', long = "port", default_value_t = 8080)]
    port: u16,

    /// Interface to listen on
    #[arg(long = "host", default_value = "0.0.0.0")]
    host: String,

    /// Directory with index.html and static/ (API only if omitted)
    #[arg(long = "assets")]
    assets: Option<PathBuf>,

    /// Seconds a session token stays valid (never expires if omitted)
    #[arg(long = "token-ttl")]
    token_ttl: Option<u64>,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            password: self.password,
            data_file: self.file,
            title: self.title,
            host: self.host,
            port: self.port,
            assets_dir: self.assets,
            session: SessionConfig {
                token_ttl_secs: self.token_ttl,
                ..SessionConfig::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), GuidepostError> {
    let config = Args::parse().into_config();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.password == ServerConfig::default().password {
        tracing::warn!("using the default password; pass --pwd to change it");
    }
    tracing::info!(?config, "starting");

    let server = GuidepostServer::builder()
        .config(&config)
        .build(PasswordVerifier::new(config.password.clone()))
        .await
        .inspect_err(|e| tracing::error!(error = %e, "startup failed"))?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown requested");
        })
        .await
}
