use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server bind address: {e}")))
}

/// Router over an already-built state.
pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Connect the pool, apply migrations, and serve until `shutdown` resolves.
pub async fn run<S>(cfg: AppConfig, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(&cfg)?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrations_applied", "schema is up to date");

    let state = AppState::with_database(db, Duration::from_secs(cfg.server.request_timeout_secs));
    let app = build_app(state);

    info!(%addr, app = %cfg.app.name, environment = %cfg.app.environment, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(event = "server_stopped", "listener closed");
    Ok(())
}
