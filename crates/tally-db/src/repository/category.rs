//! # Category Repository
//!
//! Database operations for product categories.
//!
//! Deleting a category never deletes products: the schema's
//! `ON DELETE SET NULL` clears `products.category_id` instead.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult, StoreResult};
use crate::repository::{now_utc, timestamp_key};
use tally_core::validation::validate_category_input;
use tally_core::{Category, CategoryInput};

const SELECT_CATEGORY: &str = r#"
    SELECT id, name, description, created_at, updated_at
    FROM categories
"#;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories in id order.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORY} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORY} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// Checks whether a category exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Creates a category.
    ///
    /// ## Errors
    /// - `Rejected(Validation)` for a blank or over-long name
    pub async fn create(&self, input: &CategoryInput) -> StoreResult<Category> {
        validate_category_input(input)?;

        let now = now_utc();
        let name = input.name.trim();

        debug!(name = %name, "Creating category");

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(name)
        .bind(&input.description)
        .bind(timestamp_key(now))
        .execute(&self.pool)
        .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces a category's name and description.
    ///
    /// ## Errors
    /// - `Rejected(Validation)` for a blank name
    /// - `Storage(NotFound)` if the id doesn't exist
    pub async fn update(&self, id: i64, input: &CategoryInput) -> StoreResult<Category> {
        validate_category_input(input)?;

        debug!(id = id, "Updating category");

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?2, description = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(timestamp_key(now_utc()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id).into());
        }

        let category = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))?;

        Ok(category)
    }

    /// Deletes a category. Products in it become uncategorized.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::{Database, DbConfig};
    use tally_core::{CategoryInput, CoreError, ProductInput};

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: format!("{name} items"),
        }
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let drinks = repo.create(&input("  Drinks ")).await.unwrap();
        let snacks = repo.create(&input("Snacks")).await.unwrap();
        assert_eq!(drinks.name, "Drinks");

        let fetched = repo.get_by_id(drinks.id).await.unwrap().unwrap();
        assert_eq!(fetched, drinks);

        let all = repo.list().await.unwrap();
        assert_eq!(
            all.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![drinks.id, snacks.id]
        );
        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(repo.exists(snacks.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.categories().create(&input("   ")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected(CoreError::Validation(_))));
        assert!(db.categories().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();
        let cat = repo.create(&input("Drinks")).await.unwrap();

        let updated = repo.update(cat.id, &input("Beverages")).await.unwrap();
        assert_eq!(updated.name, "Beverages");
        assert_eq!(updated.created_at, cat.created_at);
        assert!(updated.updated_at >= cat.updated_at);

        let err = repo.update(404, &input("Ghost")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Storage(crate::DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(404).await,
            Err(crate::DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_uncategorizes_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cat = db.categories().create(&input("Drinks")).await.unwrap();
        let product = db
            .products()
            .create(&ProductInput {
                name: "Teh Botol".to_string(),
                price: 5_000,
                stock: 10,
                category_id: Some(cat.id),
            })
            .await
            .unwrap();
        assert_eq!(product.category_name, "Drinks");

        db.categories().delete(cat.id).await.unwrap();

        let product = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(product.category_id, None);
        assert_eq!(product.category_name, "");
    }
}
