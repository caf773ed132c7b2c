//! Lightweight admin HTTP listener
//!
//! Exposes `/healthz` and `/metrics` endpoints, with metrics provided by caller.

use axum::{http::StatusCode, routing::get, Router};
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{error, info};

async fn healthz() -> &'static str { "OK" }

/// Build the admin router; `metrics_fn` renders the metrics body on demand.
pub fn admin_router(metrics_fn: fn() -> (StatusCode, String)) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || async move { metrics_fn() }))
}

/// Spawn the admin listener on the current runtime.
/// Bind or serve failures are logged; they never take the main server down.
pub fn spawn_admin_server(addr: String, metrics_fn: fn() -> (StatusCode, String)) -> JoinHandle<()> {
    tokio::spawn(async move {
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!(%addr, error = %e, "admin listener bind failed");
                return;
            }
        };
        info!(%addr, "admin server listening");
        if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
            error!(%addr, error = %e, "admin server stopped");
        }
    })
}
