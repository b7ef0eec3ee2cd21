//! In-memory catalog store.
//!
//! Mirrors the PostgreSQL table constraints (unique names, restrictive
//! foreign keys, no self-parenting) so services behave the same on
//! either backend.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_entity::category::{Category, CategoryCount, CategoryData, CategoryWithCount};
use catalog_entity::product::{Product, ProductData};

use crate::repositories::traits::{CategoryRepository, ProductRepository};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

impl Tables {
    fn next_category_id(&mut self) -> i32 {
        self.next_category_id += 1;
        self.next_category_id
    }

    fn next_product_id(&mut self) -> i32 {
        self.next_product_id += 1;
        self.next_product_id
    }

    fn product_counts(&self) -> HashMap<i32, u64> {
        let mut counts = HashMap::new();
        for product in self.products.values() {
            *counts.entry(product.category_id).or_insert(0) += 1;
        }
        counts
    }

    fn check_category_write(&self, id: Option<i32>, data: &CategoryData) -> AppResult<()> {
        let duplicate = self
            .categories
            .values()
            .any(|c| c.name == data.name && Some(c.id) != id);
        if duplicate {
            return Err(AppError::conflict(format!(
                "Category '{}' already exists",
                data.name
            )));
        }
        if let Some(parent_id) = data.parent_id {
            if Some(parent_id) == id {
                return Err(AppError::conflict("A category cannot be its own child"));
            }
            if !self.categories.contains_key(&parent_id) {
                return Err(AppError::not_found("Parent category not found"));
            }
            if let Some(id) = id {
                if self.is_ancestor_or_self(id, parent_id) {
                    return Err(AppError::conflict(
                        "A category cannot be moved under one of its descendants",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Whether `ancestor` lies on the parent chain starting at `id`.
    fn is_ancestor_or_self(&self, ancestor: i32, id: i32) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            cursor = self.categories.get(&current).and_then(|c| c.parent_id);
        }
        false
    }
}

/// Catalog tables held behind a single async lock.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category row verbatim, skipping every constraint.
    ///
    /// Lets tests plant dangling parents and cycles that the regular write
    /// path refuses.
    pub async fn seed_category(&self, id: i32, name: &str, parent_id: Option<i32>) -> Category {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let category = Category {
            id,
            name: name.to_string(),
            picture: None,
            parent_id,
            created_at: now,
            updated_at: now,
        };
        tables.next_category_id = tables.next_category_id.max(id);
        tables.categories.insert(id, category.clone());
        category
    }
}

#[async_trait]
impl CategoryRepository for MemoryCatalogStore {
    async fn fetch_category_product_counts(&self) -> AppResult<Vec<CategoryCount>> {
        let tables = self.tables.read().await;
        let counts = tables.product_counts();
        Ok(tables
            .categories
            .values()
            .map(|c| CategoryCount {
                id: c.id,
                name: c.name.clone(),
                picture: c.picture.clone(),
                parent_id: c.parent_id,
                count: counts.get(&c.id).copied().unwrap_or(0) as i64,
            })
            .collect())
    }

    async fn list_with_counts(&self) -> AppResult<Vec<CategoryWithCount>> {
        let tables = self.tables.read().await;
        let counts = tables.product_counts();
        let mut list: Vec<CategoryWithCount> = tables
            .categories
            .values()
            .map(|c| CategoryWithCount {
                category: c.clone(),
                products_count: counts.get(&c.id).copied().unwrap_or(0),
            })
            .collect();
        list.sort_by(|a, b| a.category.name.cmp(&b.category.name));
        Ok(list)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_ancestry(&self, id: i32) -> AppResult<Vec<i32>> {
        let tables = self.tables.read().await;
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = tables.categories.get(&id);
        while let Some(category) = cursor {
            if !seen.insert(category.id) {
                break;
            }
            chain.push(category.id);
            cursor = category
                .parent_id
                .and_then(|parent| tables.categories.get(&parent));
        }
        Ok(chain)
    }

    async fn create(&self, data: &CategoryData) -> AppResult<Category> {
        let mut tables = self.tables.write().await;
        tables.check_category_write(None, data)?;

        let now = Utc::now();
        let category = Category {
            id: tables.next_category_id(),
            name: data.name.clone(),
            picture: data.picture.clone(),
            parent_id: data.parent_id,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: i32, data: &CategoryData) -> AppResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Ok(None);
        }
        tables.check_category_write(Some(id), data)?;

        let Some(category) = tables.categories.get_mut(&id) else {
            return Ok(None);
        };
        category.name = data.name.clone();
        category.picture = data.picture.clone();
        category.parent_id = data.parent_id;
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let referenced = tables.products.values().any(|p| p.category_id == id)
            || tables.categories.values().any(|c| c.parent_id == Some(id));
        if referenced {
            return Err(AppError::conflict(
                "Category is still referenced by products or children",
            ));
        }
        Ok(tables.categories.remove(&id).is_some())
    }

    async fn category_id_exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.read().await.categories.contains_key(&id))
    }

    async fn category_name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .any(|c| c.name == name && Some(c.id) != exclude_id))
    }

    async fn category_has_children(&self, id: i32) -> AppResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .any(|c| c.parent_id == Some(id)))
    }

    async fn category_has_products(&self, id: i32) -> AppResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .products
            .values()
            .any(|p| p.category_id == id))
    }
}

#[async_trait]
impl ProductRepository for MemoryCatalogStore {
    async fn find_page(&self, page: &PageRequest) -> AppResult<PageResponse<Product>> {
        let tables = self.tables.read().await;
        let items: Vec<Product> = tables
            .products
            .values()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            tables.products.len() as u64,
        ))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn create(&self, data: &ProductData) -> AppResult<Product> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&data.category_id) {
            return Err(AppError::not_found("Category not found"));
        }

        let now = Utc::now();
        let product = Product {
            id: tables.next_product_id(),
            name: data.name.clone(),
            picture: data.picture.clone(),
            category_id: data.category_id,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, data: &ProductData) -> AppResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Ok(None);
        }
        if !tables.categories.contains_key(&data.category_id) {
            return Err(AppError::not_found("Category not found"));
        }

        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        product.name = data.name.clone();
        product.picture = data.picture.clone();
        product.category_id = data.category_id;
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }

    async fn product_exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.read().await.products.contains_key(&id))
    }
}
