//! Product endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use tally_core::{Product, ProductInput};

use crate::error::{ApiError, ApiResult};
use crate::response::{created, ok, Envelope};
use crate::AppState;

/// Query string for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name
    pub name: Option<String>,
}

/// `GET /products?name=`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<Vec<Product>>>> {
    let Query(query) = query?;
    let products = state.db.products().list(query.name.as_deref()).await?;
    Ok(ok("Successfully retrieved all products", products))
}

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Product>>)> {
    let Json(input) = payload?;
    let product = state.db.products().create(&input).await?;
    Ok(created("Product created successfully", product))
}

/// `GET /products/{id}`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<Product>>> {
    let Path(id) = id?;
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    Ok(ok("Product retrieved successfully", product))
}

/// `PUT /products/{id}`
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Envelope<Product>>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let product = state.db.products().update(id, &input).await?;
    Ok(ok("Product updated successfully", product))
}

/// `DELETE /products/{id}`
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<()>>> {
    let Path(id) = id?;
    state.db.products().delete(id).await?;
    Ok(Json(Envelope::message("Product deleted successfully")))
}
