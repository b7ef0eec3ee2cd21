//! PostgreSQL category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_entity::category::{Category, CategoryCount, CategoryData, CategoryWithCount};

use super::traits::CategoryRepository;

const NAME_CONSTRAINT: &str = "categories_name_key";
const PARENT_CONSTRAINT: &str = "categories_parent_id_fkey";
const SELF_PARENT_CONSTRAINT: &str = "categories_not_own_parent";

/// Advisory lock key serializing re-parenting writes.
const HIERARCHY_LOCK_KEY: i64 = 0x6361_7465_676f_7279;

/// Ids from `$1` up to its root, nearest first, stopping on a repeat.
const ANCESTRY_SQL: &str = "WITH RECURSIVE ancestry (id, parent_id, depth, trail) AS ( \
        SELECT id, parent_id, 0, ARRAY[id] FROM categories WHERE id = $1 \
        UNION ALL \
        SELECT c.id, c.parent_id, a.depth + 1, a.trail || c.id \
        FROM categories c INNER JOIN ancestry a ON c.id = a.parent_id \
        WHERE NOT c.id = ANY(a.trail) \
     ) SELECT id FROM ancestry ORDER BY depth ASC";

/// Category row joined with its direct product count.
#[derive(Debug, FromRow)]
struct CategoryCountRow {
    id: i32,
    name: String,
    picture: Option<String>,
    parent_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    products_count: i64,
}

impl From<CategoryCountRow> for CategoryWithCount {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            category: Category {
                id: row.id,
                name: row.name,
                picture: row.picture,
                parent_id: row.parent_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            products_count: row.products_count.max(0) as u64,
        }
    }
}

/// Repository for category CRUD and hierarchy queries.
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, sql: &str, id: i32, what: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Failed to check {what}"), e))
    }
}

/// Translate constraint violations on write into domain errors.
fn map_write_error(e: sqlx::Error, data: &CategoryData, action: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some(NAME_CONSTRAINT) => {
                return AppError::conflict(format!("Category '{}' already exists", data.name));
            }
            Some(PARENT_CONSTRAINT) => {
                return AppError::not_found("Parent category not found");
            }
            Some(SELF_PARENT_CONSTRAINT) => {
                return AppError::conflict("A category cannot be its own child");
            }
            _ => {}
        }
    }
    AppError::with_source(ErrorKind::Database, format!("Failed to {action} category"), e)
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn fetch_category_product_counts(&self) -> AppResult<Vec<CategoryCount>> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT c.id, c.name, c.picture, c.parent_id, COUNT(p.id) AS count \
             FROM categories c LEFT JOIN products p ON p.category_id = c.id \
             GROUP BY c.id ORDER BY c.id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count category products", e)
        })
    }

    async fn list_with_counts(&self) -> AppResult<Vec<CategoryWithCount>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            "SELECT c.*, COUNT(p.id) AS products_count \
             FROM categories c LEFT JOIN products p ON p.category_id = c.id \
             GROUP BY c.id ORDER BY c.name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))?;

        Ok(rows.into_iter().map(CategoryWithCount::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn find_ancestry(&self, id: i32) -> AppResult<Vec<i32>> {
        sqlx::query_scalar::<_, i32>(ANCESTRY_SQL)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestry", e))
    }

    async fn create(&self, data: &CategoryData) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, picture, parent_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.picture)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, data, "create"))
    }

    async fn update(&self, id: i32, data: &CategoryData) -> AppResult<Option<Category>> {
        let tx_error =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to update category", e);
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        // Concurrent moves must see each other's parent pointers.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(HIERARCHY_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(tx_error)?;

        if let Some(parent_id) = data.parent_id {
            let ancestry = sqlx::query_scalar::<_, i32>(ANCESTRY_SQL)
                .bind(parent_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(tx_error)?;
            if ancestry.contains(&id) {
                return Err(AppError::conflict(
                    "A category cannot be moved under one of its descendants",
                ));
            }
        }

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, picture = $3, parent_id = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.picture)
        .bind(data.parent_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, data, "update"))?;

        tx.commit().await.map_err(tx_error)?;
        Ok(category)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::conflict("Category is still referenced by products or children")
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete category", e),
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn category_id_exists(&self, id: i32) -> AppResult<bool> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            id,
            "category",
        )
        .await
    }

    async fn category_name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories \
             WHERE name = $1 AND ($2::INT IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check category name", e)
        })
    }

    async fn category_has_children(&self, id: i32) -> AppResult<bool> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE parent_id = $1)",
            id,
            "category children",
        )
        .await
    }

    async fn category_has_products(&self, id: i32) -> AppResult<bool> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM products WHERE category_id = $1)",
            id,
            "category products",
        )
        .await
    }
}
