//! Server Implementation
//!
//! HTTP server startup and graceful shutdown

use std::time::Duration;

use crate::api::build_app;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (shared with tests or oneshot callers)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };
        let pool = state.pool.clone();

        let app = build_app(state);
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Marketplace server listening on {}", addr);

        let shutdown_timeout = Duration::from_millis(self.config.shutdown_timeout_ms);
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        // In-flight queries get a bounded window before the pool is dropped
        if tokio::time::timeout(shutdown_timeout, pool.close())
            .await
            .is_err()
        {
            tracing::warn!("Database pool did not close within {:?}", shutdown_timeout);
        }

        Ok(())
    }
}
