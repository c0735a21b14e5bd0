//! HTTP surface of the relay.
//!
//! - `POST /analyze`: the relay itself
//! - `GET /health`: liveness
//! - everything else: static editor assets from `server.static_dir`

pub mod handlers;
pub mod state;

pub use state::ServerState;

use crate::config::ServerConfig;
use crate::error::server::ServerError;
use crate::relay::Relay;

use common::ErrorLocation;

use std::net::SocketAddr;
use std::panic::Location;
use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use log::{error, info};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;

pub fn build_router(state: ServerState, static_dir: &Path) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Handle to a running relay server.
///
/// Dropping the handle leaves the server running until the process exits;
/// call [`RelayServerHandle::shutdown`] to stop it.
pub struct RelayServerHandle {
    address: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RelayServerHandle {
    /// Bound address. With port 0 in config this is where the OS put us.
    pub fn local_addr(&self) -> SocketAddr {
        self.address
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Stop accepting connections, let in-flight requests finish, then return.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        // The receiver is gone only if the server already stopped.
        let _ = self.shutdown_tx.send(());

        match self.task.await {
            Ok(Ok(())) => {
                info!("Relay server on {} stopped", self.address);
                Ok(())
            }
            Ok(Err(e)) => Err(ServerError::Serve {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(ServerError::Serve {
                message: format!("Server task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Bind `config.host:config.port` and serve in a background task.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address is in use or cannot be bound.
pub async fn start_relay_server(
    config: &ServerConfig,
    relay: Relay,
) -> Result<RelayServerHandle, ServerError> {
    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ServerError::Bind {
            address: address.clone(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
    let local_addr = listener.local_addr()?;

    let router = build_router(ServerState::new(relay), Path::new(&config.static_dir));
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
        if let Err(e) = &result {
            error!("Relay server terminated with error: {}", e);
        }
        result
    });

    info!("Server running on http://{}", local_addr);

    Ok(RelayServerHandle {
        address: local_addr,
        shutdown_tx,
        task,
    })
}
