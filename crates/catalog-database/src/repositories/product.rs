//! PostgreSQL product repository.

use async_trait::async_trait;
use sqlx::PgPool;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_entity::product::{Product, ProductData};

use super::traits::ProductRepository;

const CATEGORY_CONSTRAINT: &str = "products_category_id_fkey";

/// Repository for product CRUD.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(CATEGORY_CONSTRAINT) => {
            AppError::not_found("Category not found")
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} product"), e),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_page(&self, page: &PageRequest) -> AppResult<PageResponse<Product>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count products", e))?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))?;

        Ok(PageResponse::new(
            products,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    async fn create(&self, data: &ProductData) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, picture, category_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.picture)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))
    }

    async fn update(&self, id: i32, data: &ProductData) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, picture = $3, category_id = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.picture)
        .bind(data.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete product", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn product_exists(&self, id: i32) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check product", e))
    }
}
