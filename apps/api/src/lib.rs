//! # tally-api: HTTP Server for Tally POS
//!
//! axum application exposing catalog management, checkout and sales
//! reports over JSON.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally API Server                                 │
//! │                                                                         │
//! │  main.rs                                                               │
//! │  ├── init_tracing()          EnvFilter, RUST_LOG overrides             │
//! │  ├── ApiConfig::load()       defaults → tally.toml → TALLY_*           │
//! │  ├── Database::new()         pool + migrations                         │
//! │  └── axum::serve(build_router(state))                                  │
//! │            .with_graceful_shutdown(shutdown_signal())                  │
//! │                                                                         │
//! │  Router                                                                 │
//! │  ├── /                        routes::system                           │
//! │  ├── /health                  routes::system                           │
//! │  ├── /categories[/{id}]       routes::category                         │
//! │  ├── /products[/{id}]         routes::product                          │
//! │  ├── /api/checkout            routes::transaction                      │
//! │  ├── /api/transactions/{id}   routes::transaction                      │
//! │  └── /api/report[/today]      routes::report                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod response;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ApiConfig;
use tally_db::Database;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tally=debug,tower_http=debug,sqlx=warn";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Builds the full application router with middleware.
pub fn build_router(state: AppState) -> Router {
    routes::router()
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Browser clients may call the API from any origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(Duration::from_secs(86_400))
}

// =============================================================================
// Process Lifecycle
// =============================================================================

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
