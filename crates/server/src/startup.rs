use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect, migrate and assemble the router without binding a socket.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_sqlite_dir(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    common::env::ensure_frontend(&cfg.server.frontend_dir).await;
    let state = ServerState::new(db, &cfg.auth)?;
    Ok(routes::build_router(state, &cfg.server.frontend_dir, build_cors()))
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

/// Load configuration from file/env and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    run_until(cfg, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("received Ctrl+C, shutting down");
    })
    .await
}
