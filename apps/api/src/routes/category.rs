//! Category endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use tally_core::{Category, CategoryInput, Product};

use crate::error::{ApiError, ApiResult};
use crate::response::{created, ok, Envelope};
use crate::AppState;

/// `GET /categories`
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<Category>>>> {
    let categories = state.db.categories().list().await?;
    Ok(ok("Successfully retrieved all categories", categories))
}

/// `POST /categories`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Category>>)> {
    let Json(input) = payload?;
    let category = state.db.categories().create(&input).await?;
    Ok(created("Category created successfully", category))
}

/// `GET /categories/{id}`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<Category>>> {
    let Path(id) = id?;
    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(ok("Category retrieved successfully", category))
}

/// `PUT /categories/{id}`
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Envelope<Category>>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let category = state.db.categories().update(id, &input).await?;
    Ok(ok("Category updated successfully", category))
}

/// `DELETE /categories/{id}`
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<()>>> {
    let Path(id) = id?;
    state.db.categories().delete(id).await?;
    Ok(Json(Envelope::message("Category deleted successfully")))
}

/// `GET /categories/{id}/products`
pub async fn products(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<Vec<Product>>>> {
    let Path(id) = id?;
    let products = state.db.products().list_by_category(id).await?;
    Ok(ok("Successfully retrieved category products", products))
}
