//! Square picture pipeline.

pub mod compose;
pub mod naming;
pub mod pipeline;

pub use compose::{OutputFormat, compose_square};
pub use naming::generate_stem;
pub use pipeline::ImagePipeline;
