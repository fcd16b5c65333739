//! HTTP API server for the Saathi gateway

pub mod health;
pub mod voice;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::relay::VoiceRelay;
use crate::Result;

/// Shared state for API handlers
pub struct ApiState {
    /// The voice query relay with its injected provider handles
    pub relay: VoiceRelay,

    /// Language applied when a query carries none
    pub default_language: String,
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
    public_dir: PathBuf,
}

impl ApiServer {
    /// Create an API server around a relay
    #[must_use]
    pub fn new(relay: VoiceRelay, config: &Config) -> Self {
        let state = Arc::new(ApiState {
            relay,
            default_language: config.default_language.clone(),
        });

        Self {
            state,
            port: config.port,
            public_dir: config.public_dir.clone(),
        }
    }

    /// Build the router with all routes
    ///
    /// Exposed separately so tests can drive the router without a socket.
    #[must_use]
    pub fn router(state: Arc<ApiState>, public_dir: &Path) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .nest("/api/voice", voice::router(state))
            .merge(health::router())
            .nest_service("/public", ServeDir::new(public_dir))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        std::fs::create_dir_all(&self.public_dir)?;

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        let router = Self::router(self.state, &self.public_dir);
        axum::serve(listener, router)
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
