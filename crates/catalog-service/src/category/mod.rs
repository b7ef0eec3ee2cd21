//! Category management and tree aggregation.

pub mod service;
pub mod tree;

pub use service::CategoryService;
pub use tree::{TreeAggregator, build_tree};
