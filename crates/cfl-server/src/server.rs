use std::sync::Arc;

use cfl_ledger::{Ledger, SharedLedger};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Carbon footprint ledger server.
pub struct CflServer {
    config: ServerConfig,
    ledger: Arc<SharedLedger>,
}

impl CflServer {
    /// Server over a fresh ledger holding only its genesis record.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Ok(Self::with_ledger(config, Ledger::new()?))
    }

    pub fn with_ledger(config: ServerConfig, ledger: Ledger) -> Self {
        Self {
            config,
            ledger: Arc::new(SharedLedger::new(ledger)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn ledger(&self) -> Arc<SharedLedger> {
        Arc::clone(&self.ledger)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(self.ledger(), self.config.threshold))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            threshold = self.config.threshold,
            "carbon ledger listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
