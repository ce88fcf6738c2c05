//! HTTP routes.
//!
//! Path parameters use axum 0.8 `{param}` syntax. Unknown paths get a 404
//! in the standard envelope.

pub mod category;
pub mod product;
pub mod report;
pub mod system;
pub mod transaction;

use axum::routing::{get, post};
use axum::Router;

use crate::error::{ApiError, ErrorCode};
use crate::AppState;

/// All routes, without middleware or state.
pub fn router() -> Router<AppState> {
    Router::new()
        // System
        .route("/", get(system::info))
        .route("/health", get(system::health))
        // Categories
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/{id}",
            get(category::get).put(category::update).delete(category::delete),
        )
        .route("/categories/{id}/products", get(category::products))
        // Products
        .route("/products", get(product::list).post(product::create))
        .route(
            "/products/{id}",
            get(product::get).put(product::update).delete(product::delete),
        )
        // Checkout & transactions
        .route("/api/checkout", post(transaction::checkout))
        .route("/api/transactions/{id}", get(transaction::get))
        // Reports
        .route("/api/report/today", get(report::today))
        .route("/api/report", get(report::range))
        .fallback(not_found)
}

async fn not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "Route not found")
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use tally_core::ReportWindow;
    use tally_db::{Database, DbConfig};

    use crate::config::ApiConfig;
    use crate::{build_router, AppState};

    async fn app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        build_router(AppState::new(db, ApiConfig::default()))
    }

    async fn request(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(raw) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(raw.to_string())
            }
            None => Body::empty(),
        };

        let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        request(app, method, uri, Some(&body.to_string())).await
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        request(app, Method::GET, uri, None).await
    }

    async fn create_product(app: &Router, name: &str, price: i64, stock: i64) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/products",
            json!({ "name": name, "price": price, "stock": stock }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    // =========================================================================
    // System
    // =========================================================================

    #[tokio::test]
    async fn test_info_and_health() {
        let app = app().await;

        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["endpoints"]["checkout"], "/api/checkout");

        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Server is running successfully");
        assert!(body["migrations"]["total"].as_u64().unwrap() >= 1);
        assert_eq!(body["migrations"]["applied"], body["migrations"]["total"]);
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let app = app().await;

        let (status, body) = get(&app, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "status": false, "message": "Route not found" }));
    }

    // =========================================================================
    // Categories
    // =========================================================================

    #[tokio::test]
    async fn test_category_crud() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/categories",
            json!({ "name": "  Drinks ", "description": "Cold" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], true);
        assert_eq!(body["message"], "Category created successfully");
        assert_eq!(body["data"]["name"], "Drinks");
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = get(&app, "/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/categories/{id}"),
            json!({ "name": "Beverages" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Beverages");
        assert_eq!(body["data"]["description"], "");

        let (status, body) = request(&app, Method::DELETE, &format!("/categories/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Category deleted successfully");
        assert!(body.get("data").is_none());

        let (status, body) = get(&app, &format!("/categories/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], format!("Category not found: {id}"));
    }

    #[tokio::test]
    async fn test_category_rejects_bad_input() {
        let app = app().await;

        let (status, body) = send(&app, Method::POST, "/categories", json!({ "name": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name is required");

        let (status, body) = get(&app, "/categories/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid ID");

        let (status, _) =
            send(&app, Method::PUT, "/categories/42", json!({ "name": "Ghost" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(&app, Method::DELETE, "/categories/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_category_products() {
        let app = app().await;

        let (_, body) = send(&app, Method::POST, "/categories", json!({ "name": "Food" })).await;
        let category_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            Method::POST,
            "/products",
            json!({ "name": "Indomie", "price": 3000, "stock": 10, "category_id": category_id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        create_product(&app, "Loose Item", 500, 1).await;

        let (status, body) = get(&app, &format!("/categories/{category_id}/products")).await;
        assert_eq!(status, StatusCode::OK);
        let products = body["data"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["category_name"], "Food");

        let (status, _) = get(&app, "/categories/999/products").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // Products
    // =========================================================================

    #[tokio::test]
    async fn test_product_crud_and_search() {
        let app = app().await;

        let id = create_product(&app, "Indomie Goreng", 3000, 40).await;
        create_product(&app, "Aqua 600ml", 4000, 24).await;

        let (status, body) = get(&app, "/products?name=INDO").await;
        assert_eq!(status, StatusCode::OK);
        let found = body["data"].as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Indomie Goreng");

        let (_, body) = get(&app, "/products").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/products/{id}"),
            json!({ "name": "Indomie Soto", "price": 3500, "stock": 12 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product updated successfully");
        assert_eq!(body["data"]["price"], 3500);

        let (status, _) = request(&app, Method::DELETE, &format!("/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get(&app, &format!("/products/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], format!("Product not found: {id}"));
    }

    #[tokio::test]
    async fn test_product_rejects_bad_input() {
        let app = app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/products",
            json!({ "name": "Broken", "price": -1, "stock": 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/products",
            json!({ "name": "Orphan", "price": 1, "stock": 1, "category_id": 77 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = request(&app, Method::POST, "/products", Some("{\"name\":")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_product_with_sales_cannot_be_deleted() {
        let app = app().await;
        let id = create_product(&app, "Kopi", 5000, 10).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/checkout",
            json!({ "items": [ { "product_id": id, "quantity": 1 } ] }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = request(&app, Method::DELETE, &format!("/products/{id}"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], false);

        let (status, _) = get(&app, &format!("/products/{id}")).await;
        assert_eq!(status, StatusCode::OK);
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    #[tokio::test]
    async fn test_checkout_success() {
        let app = app().await;
        let phone = create_product(&app, "iPhone 15 Pro", 15_000_000, 50).await;
        let noodles = create_product(&app, "Indomie", 3000, 40).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/checkout",
            json!({ "items": [
                { "product_id": phone, "quantity": 2 },
                { "product_id": noodles, "quantity": 5 },
            ] }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["message"], "Checkout successful");

        let data = &body["data"];
        assert_eq!(data["total_amount"], 30_015_000);
        let details = data["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["product_name"], "iPhone 15 Pro");
        assert_eq!(details[0]["subtotal"], 30_000_000);
        assert_eq!(details[1]["subtotal"], 15_000);

        let (_, body) = get(&app, &format!("/products/{phone}")).await;
        assert_eq!(body["data"]["stock"], 48);
        let (_, body) = get(&app, &format!("/products/{noodles}")).await;
        assert_eq!(body["data"]["stock"], 35);

        let id = data["id"].as_i64().unwrap();
        let (status, body) = get(&app, &format!("/api/transactions/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_amount"], 30_015_000);
        assert_eq!(body["data"]["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_checkout_insufficient_stock_changes_nothing() {
        let app = app().await;
        let plenty = create_product(&app, "Aqua", 4000, 100).await;
        let scarce = create_product(&app, "Indomie", 3000, 3).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/checkout",
            json!({ "items": [
                { "product_id": plenty, "quantity": 10 },
                { "product_id": scarce, "quantity": 5 },
            ] }),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], false);
        assert!(body["message"].as_str().unwrap().contains("Indomie"));

        let (_, body) = get(&app, &format!("/products/{plenty}")).await;
        assert_eq!(body["data"]["stock"], 100);
        let (_, body) = get(&app, &format!("/products/{scarce}")).await;
        assert_eq!(body["data"]["stock"], 3);

        let (_, body) = get(&app, "/api/transactions/1").await;
        assert_eq!(body["status"], false);
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_requests() {
        let app = app().await;
        let id = create_product(&app, "Aqua", 4000, 10).await;

        let (status, body) = send(&app, Method::POST, "/api/checkout", json!({ "items": [] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "items is required");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/checkout",
            json!({ "items": [ { "product_id": id, "quantity": 0 } ] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = request(&app, Method::POST, "/api/checkout", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request body");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/checkout",
            json!({ "items": [ { "product_id": 999, "quantity": 1 } ] }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found: 999");

        let (_, body) = get(&app, &format!("/products/{id}")).await;
        assert_eq!(body["data"]["stock"], 10);
    }

    // =========================================================================
    // Reports
    // =========================================================================

    #[tokio::test]
    async fn test_daily_report_empty() {
        let app = app().await;

        let (status, body) = get(&app, "/api/report/today").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Daily sales report retrieved successfully");
        assert_eq!(body["data"]["total_revenue"], 0);
        assert_eq!(body["data"]["total_transactions"], 0);
        assert!(body["data"]["best_selling_product"].is_null());
    }

    #[tokio::test]
    async fn test_reports_after_checkout() {
        let app = app().await;
        let id = create_product(&app, "Indomie", 3000, 40).await;

        for qty in [2, 3] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/checkout",
                json!({ "items": [ { "product_id": id, "quantity": qty } ] }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = get(&app, "/api/report/today").await;
        assert_eq!(body["data"]["total_revenue"], 15_000);
        assert_eq!(body["data"]["total_transactions"], 2);
        assert_eq!(body["data"]["best_selling_product"]["name"], "Indomie");
        assert_eq!(body["data"]["best_selling_product"]["qty_sold"], 5);

        let today = ReportWindow::today().start;
        let (status, body) = get(
            &app,
            &format!("/api/report?start_date={today}&end_date={today}"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Sales report retrieved successfully");
        assert_eq!(body["data"]["total_transactions"], 2);

        let (_, body) = get(&app, "/api/report?start_date=2000-01-01&end_date=2000-01-31").await;
        assert_eq!(body["data"]["total_revenue"], 0);
    }

    #[tokio::test]
    async fn test_range_report_requires_dates() {
        let app = app().await;

        let (status, body) = get(&app, "/api/report?start_date=2026-02-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], false);

        let (status, _) = get(&app, "/api/report?start_date=02/01/2026&end_date=2026-02-28").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(
            &app,
            "/api/report?start_date=2026-02-01&start_date=2026-02-02&end_date=2026-02-28",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "status": false, "message": "Invalid query parameters" })
        );

        let (status, body) =
            get(&app, "/api/report?start_date=2026-02-01&end_date=10000-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Invalid date range: end_date must be between 0000-01-01 and 9999-12-31"
        );
    }
}
