//! Product CRUD.

use std::sync::Arc;

use tracing::info;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_database::{CategoryRepository, ProductRepository};
use catalog_entity::product::{Product, ProductData};

/// Manages product CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductService {
    /// Product repository.
    products: Arc<dyn ProductRepository>,
    /// Category repository, for owner checks.
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Lists one page of products.
    pub async fn list_products(&self, page: PageRequest) -> AppResult<PageResponse<Product>> {
        self.products.find_page(&page).await
    }

    /// Gets a product by ID.
    pub async fn get_product(&self, id: i32) -> AppResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Creates a product under an existing category.
    pub async fn create_product(&self, data: ProductData) -> AppResult<Product> {
        self.require_category(data.category_id).await?;

        let product = self.products.create(&data).await?;
        info!(
            product_id = product.id,
            category_id = product.category_id,
            "Product created"
        );
        Ok(product)
    }

    /// Updates a product.
    pub async fn update_product(&self, id: i32, data: ProductData) -> AppResult<Product> {
        if !self.products.product_exists(id).await? {
            return Err(AppError::not_found("Product not found"));
        }
        self.require_category(data.category_id).await?;

        let product = self
            .products
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;
        info!(
            product_id = id,
            category_id = product.category_id,
            "Product updated"
        );
        Ok(product)
    }

    /// Deletes a product.
    pub async fn delete_product(&self, id: i32) -> AppResult<()> {
        if !self.products.delete(id).await? {
            return Err(AppError::not_found("Product not found"));
        }
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn require_category(&self, category_id: i32) -> AppResult<()> {
        if self.categories.category_id_exists(category_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Category not found"))
        }
    }
}
