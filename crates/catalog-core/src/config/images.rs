//! Image upload pipeline configuration.

use serde::{Deserialize, Serialize};

/// Encoder quality used when none is configured.
pub const DEFAULT_IMAGE_QUALITY: u8 = 70;

/// Settings for the upload, compose, and publish pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Directory holding uploads while they are processed.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
    /// Directory receiving the composed images.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// URL prefix the output directory is served under.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Accepted `image/<ext>` subtypes.
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
    /// Maximum accepted upload size in bytes (default 4 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
    /// Gaussian blur sigma applied to the square background.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// JPEG encoder quality (0-100). WebP and PNG output is lossless.
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Output format: `"jpeg"`, `"webp"`, or `"png"`.
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
            output_dir: default_output_dir(),
            public_prefix: default_public_prefix(),
            allowed_types: default_allowed_types(),
            max_upload_bytes: default_max_upload(),
            blur_sigma: default_blur_sigma(),
            quality: default_quality(),
            output_format: default_output_format(),
        }
    }
}

fn default_temp_dir() -> String {
    "./data/uploads/temp/images".to_string()
}

fn default_output_dir() -> String {
    "./data/uploads/images".to_string()
}

fn default_public_prefix() -> String {
    "/public".to_string()
}

fn default_allowed_types() -> Vec<String> {
    vec!["png".to_string(), "jpeg".to_string(), "jpg".to_string()]
}

fn default_max_upload() -> usize {
    4 * 1024 * 1024
}

fn default_blur_sigma() -> f32 {
    26.0
}

fn default_quality() -> u8 {
    DEFAULT_IMAGE_QUALITY
}

fn default_output_format() -> String {
    "jpeg".to_string()
}
