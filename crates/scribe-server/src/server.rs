use tokio::net::TcpListener;

use scribe_sdk::Scribe;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, cors_layer};

/// Scribe HTTP server.
pub struct ScribeServer {
    config: ServerConfig,
    scribe: Scribe,
}

impl ScribeServer {
    /// Open the configured store and prepare a server.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let scribe = config.open_scribe()?;
        Ok(Self { config, scribe })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.scribe.clone()).layer(cors_layer(&self.config.cors_origins))
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            storage = ?self.config.storage,
            "scribe server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("scribe server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
