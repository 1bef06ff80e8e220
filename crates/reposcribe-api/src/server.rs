//! HTTP server wiring

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::api_routes;
use crate::state::AppState;

/// API server bound to an address
pub struct ApiServer {
    addr: SocketAddr,
    state: AppState,
}

impl ApiServer {
    /// Create a new server
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Serve until the process is stopped
    pub async fn run(self) -> std::io::Result<()> {
        let app = api_routes()
            .with_state(self.state)
            .layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "Server running");
        axum::serve(listener, app).await
    }
}
