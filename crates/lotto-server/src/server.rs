use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Lotto Oracle HTTP server.
pub struct LottoServer {
    config: ServerConfig,
    state: AppState,
}

impl LottoServer {
    /// Fails if the ensemble configuration is invalid.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = AppState::new(&config)?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("lotto server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = LottoServer::new(ServerConfig::default()).unwrap();
        assert_eq!(server.config().bind_addr.port(), 8080);
        let _router = server.router();
    }

    #[test]
    fn bad_weights_refuse_to_start() {
        let mut config = ServerConfig::default();
        config.ensemble = config.ensemble.with_weights([("lstm", 0.0)]);
        assert!(LottoServer::new(config).is_err());
    }
}
