//! Category forest materialization.
//!
//! Turns the flat `(category, parent, direct count)` rows into one
//! [`CategoryAggregate`] per category, carrying its root-to-self path and
//! the product count of its whole subtree.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{debug, warn};

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_database::CategoryRepository;
use catalog_entity::category::CategoryCount;
use catalog_entity::category::aggregate::{CategoryAggregate, PATH_SEPARATOR};

/// Computes path and rollup counts for every category.
#[derive(Debug, Clone)]
pub struct TreeAggregator {
    /// Category repository.
    categories: Arc<dyn CategoryRepository>,
}

impl TreeAggregator {
    /// Creates a new tree aggregator.
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// Materializes the whole forest, ordered by id.
    pub async fn compute_tree(&self) -> AppResult<Vec<CategoryAggregate>> {
        let rows = self.categories.fetch_category_product_counts().await?;
        let total = rows.len();

        match build_tree(rows) {
            Ok(tree) => {
                debug!(categories = total, "Computed category tree");
                Ok(tree)
            }
            Err(e) => {
                warn!(categories = total, error = %e.message, "Category hierarchy is malformed");
                Err(e)
            }
        }
    }
}

/// Builds the aggregates from grouped count rows without touching storage.
///
/// Fails with `MalformedHierarchy` on a dangling or self parent, a repeated
/// id, or any category that cannot be reached from a root.
pub fn build_tree(rows: Vec<CategoryCount>) -> AppResult<Vec<CategoryAggregate>> {
    let mut index: HashMap<i32, usize> = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if index.insert(row.id, i).is_some() {
            return Err(AppError::malformed_hierarchy(format!(
                "Category {} appears more than once",
                row.id
            )));
        }
    }

    let mut parents: Vec<Option<usize>> = Vec::with_capacity(rows.len());
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
    let mut queue = VecDeque::new();

    for (i, row) in rows.iter().enumerate() {
        match row.parent_id {
            None => {
                parents.push(None);
                queue.push_back(i);
            }
            Some(parent_id) if parent_id == row.id => {
                return Err(AppError::malformed_hierarchy(format!(
                    "Category {} is its own parent",
                    row.id
                )));
            }
            Some(parent_id) => {
                let parent = *index.get(&parent_id).ok_or_else(|| {
                    AppError::malformed_hierarchy(format!(
                        "Category {} references missing parent {parent_id}",
                        row.id
                    ))
                })?;
                parents.push(Some(parent));
                children[parent].push(i);
            }
        }
    }

    let mut paths: Vec<Option<String>> = vec![None; rows.len()];
    let mut order = Vec::with_capacity(rows.len());
    while let Some(i) = queue.pop_front() {
        let path = match parents[i].and_then(|p| paths[p].as_deref()) {
            Some(parent_path) => format!("{parent_path}{PATH_SEPARATOR}{}", rows[i].id),
            None => rows[i].id.to_string(),
        };
        paths[i] = Some(path);
        order.push(i);
        queue.extend(children[i].iter().copied());
    }

    if order.len() < rows.len() {
        let mut cyclic: Vec<i32> = rows
            .iter()
            .zip(&paths)
            .filter(|(_, path)| path.is_none())
            .map(|(row, _)| row.id)
            .collect();
        cyclic.sort_unstable();
        let ids = cyclic
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::malformed_hierarchy(format!(
            "Categories [{ids}] are not reachable from any root"
        )));
    }

    // Children always follow their parent in BFS order, so walking it
    // backwards finishes every subtree before its root.
    let direct: Vec<u64> = rows.iter().map(|row| row.count.max(0) as u64).collect();
    let mut recursive = direct.clone();
    for &i in order.iter().rev() {
        if let Some(parent) = parents[i] {
            recursive[parent] += recursive[i];
        }
    }

    let mut tree: Vec<CategoryAggregate> = rows
        .into_iter()
        .zip(paths)
        .enumerate()
        .map(|(i, (row, path))| CategoryAggregate {
            id: row.id,
            name: row.name,
            picture: row.picture,
            parent_id: row.parent_id,
            path: path.unwrap_or_default(),
            count: direct[i],
            recursive_count: recursive[i],
        })
        .collect();
    tree.sort_by_key(|node| node.id);
    Ok(tree)
}
