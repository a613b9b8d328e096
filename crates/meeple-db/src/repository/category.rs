//! # Category Repository
//!
//! Database operations for game categories.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use meeple_core::{Category, CategoryId, NewCategory};

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

    /// Lists every category in creation order.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    /// Returns true if a category with this exact name exists.
    pub async fn name_taken(&self, name: &str) -> DbResult<bool> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE name = ?1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(taken)
    }

    /// Returns true if a category with this ID exists.
    pub async fn exists(&self, id: CategoryId) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - the stored row, with its generated id
    /// * `Err(DbError::UniqueViolation)` - the name is already used
    pub async fn insert(&self, category: &NewCategory) -> DbResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let created = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES (?1) RETURNING id, name",
        )
        .bind(&category.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("name", &category.name),
            other => other,
        })?;

        info!(id = created.id, name = %created.name, "Category created");
        Ok(created)
    }
}
