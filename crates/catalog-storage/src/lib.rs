//! # catalog-storage
//!
//! File handling for the catalog. Uploaded pictures are staged in a
//! temporary directory, composed onto a blurred square backdrop, and
//! published under the public images directory.

pub mod image;

pub use self::image::ImagePipeline;
