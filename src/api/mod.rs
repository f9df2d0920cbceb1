//! HTTP surface: configuration, router and handlers.

mod auth;
mod error;
mod routes;
mod state;
pub mod v1;

#[cfg(test)]
pub(crate) mod test_support;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::paths::get_db_path;

pub use auth::AuthUser;
pub use error::{ApiError, ErrorResponse};
pub use routes::{ApiDoc, create_router};
pub use state::AppState;

/// Environment variable holding the GitHub webhook secret.
pub const WEBHOOK_SECRET_ENV: &str = "MRELLO_GITHUB_WEBHOOK_SECRET";
/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "MRELLO_DB";

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (0=info, 1=debug, 2+=trace)
    pub verbosity: u8,
    /// Serve the OpenAPI reference at /docs
    pub enable_docs: bool,
    /// Shared secret for GitHub webhook signatures
    pub webhook_secret: Option<String>,
    /// SQLite database file
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5001,
            verbosity: 0,
            enable_docs: false,
            webhook_secret: None,
            db_path: get_db_path(),
        }
    }
}

impl Config {
    /// Defaults overridden by `MRELLO_GITHUB_WEBHOOK_SECRET` and `MRELLO_DB`.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = env::var(WEBHOOK_SECRET_ENV)
            && !secret.is_empty()
        {
            config.webhook_secret = Some(secret);
        }
        if let Ok(path) = env::var(DB_PATH_ENV)
            && !path.is_empty()
        {
            config.db_path = PathBuf::from(path);
        }
        config
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_docs(mut self, enable_docs: bool) -> Self {
        self.enable_docs = enable_docs;
        self
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    pub fn with_db_path(mut self, path: PathBuf) -> Self {
        self.db_path = path;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "mrello=info,tower_http=info",
        1 => "mrello=debug,tower_http=debug",
        _ => "mrello=trace,tower_http=trace",
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing(verbosity: u8) {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Run the API server with the given configuration
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ApiError> {
    let state = AppState::new(db, config.webhook_secret.clone());
    let app = create_router(state, config.enable_docs).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    if config.webhook_secret.is_none() {
        warn!("{} not set; webhook signatures will not be verified", WEBHOOK_SECRET_ENV);
    }
    if config.enable_docs {
        info!("API reference at http://{}/docs", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ApiError::Serve)?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
