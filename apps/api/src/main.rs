//! # Tally API
//!
//! HTTP server for Tally POS.
//!
//! ```text
//! client ───► HTTP (8080) ───► axum routes ───► tally-db ───► SQLite
//! ```

use tokio::net::TcpListener;
use tracing::info;

use tally_api::config::ApiConfig;
use tally_api::{build_router, init_tracing, shutdown_signal, AppState};
use tally_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Tally API server...");

    let config = ApiConfig::load()?;
    let addr = config.bind_addr()?;
    info!(
        %addr,
        database = %config.database_path,
        env = %config.app_env,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;

    let app = build_router(AppState::new(db.clone(), config));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}
