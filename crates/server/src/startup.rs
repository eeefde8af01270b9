use std::{env, future::Future, net::SocketAddr};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// The browser frontend is served from a different origin.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> Result<SocketAddr, StartupError> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse::<SocketAddr>()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {host}:{port}: {e}")))
}

async fn connect_db(cfg: Option<&configs::AppConfig>) -> Result<DatabaseConnection, StartupError> {
    let db_cfg = match cfg {
        Some(cfg) => models::db::DatabaseConfig::from(&cfg.database),
        None => models::db::DatabaseConfig::from_env(),
    };
    let db = models::db::connect_with_config(&db_cfg).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    Ok(db)
}

/// Build the application for an already-connected database
pub fn app(db: DatabaseConnection) -> Router {
    routes::build_router(ServerState::new(db), build_cors())
}

/// Serve on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: tokio::net::TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    // config.toml is optional; env vars cover a bare deployment
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(error = %e, "config.toml not usable; falling back to environment");
            None
        }
    };

    let db = connect_db(cfg.as_ref()).await?;
    let app = app(db);

    // Bind and serve
    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting membership server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, app, ctrl_c()).await
}
