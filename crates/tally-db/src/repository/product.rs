//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Read Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products p  LEFT JOIN  categories c  ON c.id = p.category_id          │
//! │                                                                         │
//! │  → Product { ..., category_id: Some(2), category_name: "Drinks" }      │
//! │  → Product { ..., category_id: None,    category_name: ""       }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is only ever *decremented* by checkout (see
//! [`TransactionRepository`](super::transaction::TransactionRepository));
//! here it is replaced wholesale by product updates.

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult, StoreResult};
use crate::repository::{contains_pattern, now_utc, timestamp_key, BEGIN_WRITE};
use tally_core::validation::validate_product_input;
use tally_core::{CoreError, Product, ProductInput};

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.stock,
        p.category_id,
        COALESCE(c.name, '') AS category_name,
        p.created_at,
        p.updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products in id order, optionally filtered by name.
    ///
    /// The filter is a case-insensitive substring match; a blank filter
    /// lists everything.
    pub async fn list(&self, name: Option<&str>) -> DbResult<Vec<Product>> {
        let filter = name.map(str::trim).filter(|n| !n.is_empty());

        let products = match filter {
            Some(name) => {
                debug!(name = %name, "Listing products by name");
                sqlx::query_as::<_, Product>(&format!(
                    "{SELECT_PRODUCT} WHERE p.name LIKE ?1 ESCAPE '\\' ORDER BY p.id"
                ))
                .bind(contains_pattern(name))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY p.id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(products)
    }

    /// Lists the products of one category.
    ///
    /// ## Errors
    /// - `NotFound` if the category doesn't exist
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<Product>> {
        let mut tx = self.pool.begin().await?;

        if !category_exists(&mut *tx, category_id).await? {
            return Err(DbError::not_found("Category", category_id));
        }

        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE p.category_id = ?1 ORDER BY p.id"
        ))
        .bind(category_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(products)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        Ok(fetch_product(&self.pool, id).await?)
    }

    /// Creates a product.
    ///
    /// ## Errors
    /// - `Rejected(Validation)` for a blank name or negative price/stock
    /// - `Rejected(CategoryNotFound)` for a dangling `category_id`
    pub async fn create(&self, input: &ProductInput) -> StoreResult<Product> {
        validate_product_input(input)?;

        debug!(name = %input.name.trim(), category_id = ?input.category_id, "Creating product");

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        ensure_category(&mut tx, input.category_id).await?;

        let now = timestamp_key(now_utc());
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, stock, category_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        let product = fetch_product(&mut *tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        tx.commit().await?;
        Ok(product)
    }

    /// Replaces a product's name, price, stock and category.
    ///
    /// ## Errors
    /// - `Rejected(Validation)` / `Rejected(CategoryNotFound)` as for create
    /// - `Storage(NotFound)` if the id doesn't exist
    pub async fn update(&self, id: i64, input: &ProductInput) -> StoreResult<Product> {
        validate_product_input(input)?;

        debug!(id = id, stock = input.stock, "Updating product");

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        ensure_category(&mut tx, input.category_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, price = ?3, stock = ?4, category_id = ?5, updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .bind(timestamp_key(now_utc()))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id).into());
        }

        let product = fetch_product(&mut *tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        tx.commit().await?;
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// ## Errors
    /// - `NotFound` if the id doesn't exist
    /// - `ForeignKeyViolation` if transaction details reference it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn fetch_product<'e, E>(executor: E, id: i64) -> Result<Option<Product>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE p.id = ?1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

async fn category_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(found.is_some())
}

/// Rejects a `category_id` that doesn't reference an existing category.
async fn ensure_category(conn: &mut SqliteConnection, category_id: Option<i64>) -> StoreResult<()> {
    if let Some(id) = category_id {
        if !category_exists(conn, id).await? {
            return Err(CoreError::CategoryNotFound(id).into());
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
