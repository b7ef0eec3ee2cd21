//! HTTP integration tests against the in-memory catalog store.

mod category_test;
mod health_test;
mod helpers;
mod image_test;
mod product_test;
