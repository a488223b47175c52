//! Development backend for eventlist.
//!
//! Serves one REST collection (`/events` by default) from memory,
//! optionally persisted to a JSON file. Ids are assigned here and never
//! by clients.

pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use crate::state::AppState;

pub const DEFAULT_RESOURCE: &str = "events";

/// Build the application router for `resource`.
pub fn app(state: AppState, resource: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::events::router(resource))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind `addr` and serve in the background. Returns the bound address,
/// which differs from `addr` when port 0 was requested.
pub async fn spawn(state: AppState, addr: SocketAddr) -> Result<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = app(state, DEFAULT_RESOURCE);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server stopped");
        }
    });

    Ok(local_addr)
}
