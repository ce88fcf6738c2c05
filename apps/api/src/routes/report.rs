//! Sales report endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use tally_core::{ReportWindow, SalesReport};

use crate::error::ApiResult;
use crate::response::{ok, Envelope};
use crate::AppState;

/// Query string for `GET /api/report`.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /api/report/today`
pub async fn today(State(state): State<AppState>) -> ApiResult<Json<Envelope<SalesReport>>> {
    let report = state.db.reports().daily().await?;
    Ok(ok("Daily sales report retrieved successfully", report))
}

/// `GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
///
/// Both dates are inclusive UTC calendar days.
pub async fn range(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<SalesReport>>> {
    let Query(query) = query?;
    let window = ReportWindow::parse(query.start_date.as_deref(), query.end_date.as_deref())?;
    let report = state.db.reports().summarize(&window).await?;
    Ok(ok("Sales report retrieved successfully", report))
}
