//! Service information and health.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use tally_db::migrations::migration_status;

use crate::AppState;

/// `GET /` - API information and endpoint map.
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "Tally POS API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "environment": state.config.app_env,
        "description": "RESTful API for categories, products, checkout and sales reports",
        "endpoints": {
            "health": "/health",
            "categories": "/categories",
            "products": "/products",
            "checkout": "/api/checkout",
            "transactions": "/api/transactions/{id}",
            "report_today": "/api/report/today",
            "report_range": "/api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD",
        },
    }))
}

/// `GET /health` - liveness, a database round trip and migration state.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.db.health_check().await {
        let migrations = match migration_status(state.db.pool()).await {
            Ok((total, applied)) => json!({ "applied": applied, "total": total }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read migration status");
                Value::Null
            }
        };

        (
            StatusCode::OK,
            Json(json!({
                "status": "OK",
                "message": "Server is running successfully",
                "database": "up",
                "migrations": migrations,
            })),
        )
    } else {
        tracing::error!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "UNAVAILABLE",
                "message": "Database is unreachable",
                "database": "down",
            })),
        )
    }
}
