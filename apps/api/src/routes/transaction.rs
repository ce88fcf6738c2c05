//! Checkout and transaction endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use tally_core::{CheckoutRequest, Transaction};
use tally_db::StoreError;

use crate::error::{ApiError, ApiResult};
use crate::response::{created, ok, Envelope};
use crate::AppState;

/// `POST /api/checkout`
///
/// ```json
/// { "items": [ { "product_id": 1, "quantity": 2 }, { "product_id": 3, "quantity": 5 } ] }
/// ```
///
/// 201 with the persisted transaction, or an error with nothing persisted.
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Transaction>>)> {
    let Json(request) = payload?;

    match state.db.transactions().checkout(&request.items).await {
        Ok(transaction) => Ok(created("Checkout successful", transaction)),
        Err(StoreError::Rejected(reason)) => {
            info!(lines = request.items.len(), reason = %reason, "Checkout rejected");
            Err(reason.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/transactions/{id}`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<Transaction>>> {
    let Path(id) = id?;
    let transaction = state
        .db
        .transactions()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction", id))?;
    Ok(ok("Transaction retrieved successfully", transaction))
}
