//! Derived category record produced by tree materialization.

use serde::{Deserialize, Serialize};

/// Separator between ids in a materialized path.
pub const PATH_SEPARATOR: char = '.';

/// A category enriched with its root-to-self path and subtree counts.
///
/// Computed fresh on every read and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    /// Category ID.
    pub id: i32,
    /// Category name.
    pub name: String,
    /// Optional picture path.
    pub picture: Option<String>,
    /// Parent category ID.
    pub parent_id: Option<i32>,
    /// Dot-delimited ancestor ids from root to self inclusive, e.g. `"1.4.17"`.
    pub path: String,
    /// Direct product count.
    pub count: u64,
    /// Sum of `count` over this category and every descendant.
    pub recursive_count: u64,
}

impl CategoryAggregate {
    /// Ancestor ids from the root down to this category, inclusive.
    pub fn path_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.path
            .split(PATH_SEPARATOR)
            .filter_map(|segment| segment.parse().ok())
    }

    /// Number of edges between the root and this category.
    pub fn depth(&self) -> usize {
        self.path.matches(PATH_SEPARATOR).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(path: &str) -> CategoryAggregate {
        CategoryAggregate {
            id: 17,
            name: "Laptops".to_string(),
            picture: None,
            parent_id: Some(4),
            path: path.to_string(),
            count: 2,
            recursive_count: 2,
        }
    }

    #[test]
    fn test_path_ids_and_depth() {
        let agg = aggregate("1.4.17");
        assert_eq!(agg.path_ids().collect::<Vec<_>>(), vec![1, 4, 17]);
        assert_eq!(agg.depth(), 2);
        assert_eq!(aggregate("3").depth(), 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(aggregate("1.4.17")).unwrap();
        assert_eq!(json["parentId"], 4);
        assert_eq!(json["recursiveCount"], 2);
        assert_eq!(json["path"], "1.4.17");
    }
}
