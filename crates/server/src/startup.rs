use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{metrics, routes::{self, auth}};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: connect, migrate, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.uses_dev_secret() {
        warn!("JWT secret not configured; using the development default");
    }
    common::env::ensure_frontend(&cfg.server.frontend_dir).await;
    common::env::ensure_sqlite_parent(&cfg.database.url).await?;

    let db = models::db::connect_and_migrate(&cfg.database).await?;

    metrics::init();
    if let Some(addr) = cfg.server.admin_addr.clone() {
        common::admin_http::spawn_admin_server(addr, metrics::encode_metrics);
    }

    let state = auth::ServerState::new(db, &cfg.auth);
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.frontend_dir);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
