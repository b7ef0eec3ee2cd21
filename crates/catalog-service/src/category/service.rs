//! Category CRUD with hierarchy and linkage checks.

use std::sync::Arc;

use tracing::info;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_database::CategoryRepository;
use catalog_entity::category::{Category, CategoryAggregate, CategoryData, CategoryWithCount};

use super::tree::TreeAggregator;

/// Manages category CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category repository.
    categories: Arc<dyn CategoryRepository>,
    /// Tree aggregator over the same repository.
    tree: TreeAggregator,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            tree: TreeAggregator::new(Arc::clone(&categories)),
            categories,
        }
    }

    /// Lists all categories by name with their direct product counts.
    pub async fn list_categories(&self) -> AppResult<Vec<CategoryWithCount>> {
        self.categories.list_with_counts().await
    }

    /// Materialized forest with paths and rollup counts.
    pub async fn category_tree(&self) -> AppResult<Vec<CategoryAggregate>> {
        self.tree.compute_tree().await
    }

    /// Gets a category by ID.
    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a new category.
    pub async fn create_category(&self, data: CategoryData) -> AppResult<Category> {
        if let Some(parent_id) = data.parent_id {
            self.require_parent(parent_id).await?;
        }
        self.require_unique_name(&data.name, None).await?;

        let category = self.categories.create(&data).await?;
        info!(
            category_id = category.id,
            parent_id = ?category.parent_id,
            name = %category.name,
            "Category created"
        );
        Ok(category)
    }

    /// Updates a category's name, picture and parent.
    pub async fn update_category(&self, id: i32, data: CategoryData) -> AppResult<Category> {
        if data.parent_id == Some(id) {
            return Err(AppError::conflict("A category cannot be its own child"));
        }
        if !self.categories.category_id_exists(id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        if let Some(parent_id) = data.parent_id {
            self.require_parent(parent_id).await?;
        }
        self.require_unique_name(&data.name, Some(id)).await?;

        if let Some(parent_id) = data.parent_id {
            let ancestry = self.categories.find_ancestry(parent_id).await?;
            if ancestry.contains(&id) {
                return Err(AppError::conflict(
                    "A category cannot be moved under one of its descendants",
                ));
            }
        }

        let category = self
            .categories
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))?;

        info!(
            category_id = id,
            parent_id = ?category.parent_id,
            "Category updated"
        );
        Ok(category)
    }

    /// Deletes a category with no linked products or children.
    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        if !self.categories.category_id_exists(id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        if self.categories.category_has_products(id).await? {
            return Err(AppError::conflict("Remove linked products first"));
        }
        if self.categories.category_has_children(id).await? {
            return Err(AppError::conflict("Remove linked children first"));
        }

        if !self.categories.delete(id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn require_parent(&self, parent_id: i32) -> AppResult<()> {
        if self.categories.category_id_exists(parent_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Parent category not found"))
        }
    }

    async fn require_unique_name(&self, name: &str, exclude_id: Option<i32>) -> AppResult<()> {
        if self.categories.category_name_exists(name, exclude_id).await? {
            Err(AppError::conflict(format!("Category '{name}' already exists")))
        } else {
            Ok(())
        }
    }
}
