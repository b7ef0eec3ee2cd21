//! Storage seams consumed by the service layer.
//!
//! Both the PostgreSQL repositories and the in-memory store implement these
//! traits, so services hold `Arc<dyn CategoryRepository>` and never see the
//! backend.

use async_trait::async_trait;

use catalog_core::result::AppResult;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_entity::category::{Category, CategoryCount, CategoryData, CategoryWithCount};
use catalog_entity::product::{Product, ProductData};

/// Category persistence and the linkage checks that guard deletes.
#[async_trait]
pub trait CategoryRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Every category with its parent pointer and direct product count,
    /// fetched in one grouped query, ordered by id.
    async fn fetch_category_product_counts(&self) -> AppResult<Vec<CategoryCount>>;

    /// All categories ordered by name, each with its direct product count.
    async fn list_with_counts(&self) -> AppResult<Vec<CategoryWithCount>>;

    /// Find a category by ID.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    /// Ids from the given category up to its root, starting with `id`.
    ///
    /// Stops at the first repeated id, so a corrupt cycle cannot loop.
    async fn find_ancestry(&self, id: i32) -> AppResult<Vec<i32>>;

    /// Insert a new category.
    async fn create(&self, data: &CategoryData) -> AppResult<Category>;

    /// Overwrite a category's writable fields. `None` if it does not exist.
    ///
    /// Refuses with `Conflict` a parent that is the category itself or one
    /// of its descendants, checked atomically with the write.
    async fn update(&self, id: i32, data: &CategoryData) -> AppResult<Option<Category>>;

    /// Delete a category. Returns `true` if a row was removed.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Whether a category with this id exists.
    async fn category_id_exists(&self, id: i32) -> AppResult<bool>;

    /// Whether another category already uses this name.
    async fn category_name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool>;

    /// Whether any category names this one as parent.
    async fn category_has_children(&self, id: i32) -> AppResult<bool>;

    /// Whether any product is linked to this category.
    async fn category_has_products(&self, id: i32) -> AppResult<bool>;
}

/// Product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync + std::fmt::Debug + 'static {
    /// One page of products ordered by id.
    async fn find_page(&self, page: &PageRequest) -> AppResult<PageResponse<Product>>;

    /// Find a product by ID.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    /// Insert a new product.
    async fn create(&self, data: &ProductData) -> AppResult<Product>;

    /// Overwrite a product's writable fields. `None` if it does not exist.
    async fn update(&self, id: i32, data: &ProductData) -> AppResult<Option<Product>>;

    /// Delete a product. Returns `true` if a row was removed.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Whether a product with this id exists.
    async fn product_exists(&self, id: i32) -> AppResult<bool>;
}
