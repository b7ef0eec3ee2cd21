//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use catalog_entity::category::CategoryData;
use catalog_entity::product::ProductData;

/// Create or update category request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// Category name.
    #[validate(length(min = 3, max = 255))]
    pub name: String,
    /// Picture path returned by the upload endpoint.
    #[validate(length(max = 512))]
    #[serde(default)]
    pub picture: Option<String>,
    /// Parent category (omitted or null for a root).
    #[validate(range(min = 1))]
    #[serde(default)]
    pub parent_id: Option<i32>,
}

impl From<CategoryRequest> for CategoryData {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name,
            picture: req.picture,
            parent_id: req.parent_id,
        }
    }
}

/// Create or update product request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Product name.
    #[validate(length(min = 3, max = 255))]
    pub name: String,
    /// Picture path returned by the upload endpoint.
    #[validate(length(max = 512))]
    #[serde(default)]
    pub picture: Option<String>,
    /// Owning category.
    #[validate(range(min = 1))]
    pub category_id: i32,
}

impl From<ProductRequest> for ProductData {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            picture: req.picture,
            category_id: req.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_request_bounds() {
        let req: CategoryRequest =
            serde_json::from_str(r#"{"name": "TV", "parentId": 0}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("parent_id"));

        let req: CategoryRequest = serde_json::from_str(r#"{"name": "Televisions"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.parent_id, None);
    }

    #[test]
    fn test_product_request_into_data() {
        let req: ProductRequest = serde_json::from_str(
            r#"{"name": "Remote", "picture": "/public/images/1-a.webp", "categoryId": 4}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        let data = ProductData::from(req);
        assert_eq!(data.category_id, 4);
        assert_eq!(data.picture.as_deref(), Some("/public/images/1-a.webp"));
    }
}
