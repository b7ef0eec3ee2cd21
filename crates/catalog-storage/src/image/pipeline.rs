//! Upload pipeline: validate, stage, compose, publish.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::{debug, info, warn};

use catalog_core::config::ImageConfig;
use catalog_core::config::images::DEFAULT_IMAGE_QUALITY;
use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;

use super::compose::{OutputFormat, compose_square};
use super::naming::generate_stem;

/// Turns uploaded pictures into square images under the public directory.
#[derive(Debug, Clone)]
pub struct ImagePipeline {
    temp_dir: PathBuf,
    output_dir: PathBuf,
    public_prefix: String,
    allowed_types: Vec<String>,
    max_upload_bytes: usize,
    blur_sigma: f32,
    quality: u8,
    format: OutputFormat,
}

impl ImagePipeline {
    /// Create the pipeline and make sure its directories exist.
    pub async fn new(config: &ImageConfig) -> AppResult<Self> {
        let format = OutputFormat::from_config(&config.output_format)?;
        let temp_dir = PathBuf::from(&config.temp_dir);
        let output_dir = PathBuf::from(&config.output_dir);

        for dir in [&temp_dir, &output_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create image directory: {}", dir.display()),
                    e,
                )
            })?;
        }

        if !format.honours_quality() && config.quality != DEFAULT_IMAGE_QUALITY {
            warn!(
                format = format.extension(),
                quality = config.quality,
                "Output format is lossless, images.quality is ignored"
            );
        }

        info!(
            temp_dir = %temp_dir.display(),
            output_dir = %output_dir.display(),
            format = format.extension(),
            "Image pipeline ready"
        );

        Ok(Self {
            temp_dir,
            output_dir,
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
            allowed_types: config
                .allowed_types
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            max_upload_bytes: config.max_upload_bytes,
            blur_sigma: config.blur_sigma,
            quality: config.quality,
            format,
        })
    }

    /// Directory the composed images are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Whether `mime_type` is `image/<ext>` with `<ext>` on the allow-list.
    pub fn is_allowed(&self, mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence
            .strip_prefix("image/")
            .is_some_and(|ext| self.allowed_types.iter().any(|t| t == ext))
    }

    /// Process one upload and return its public path.
    ///
    /// The staged temp file is removed whether or not processing succeeds.
    pub async fn process_upload(&self, mime_type: &str, data: Bytes) -> AppResult<String> {
        if !self.is_allowed(mime_type) {
            return Err(AppError::unsupported_media(format!(
                "Only {} images are allowed",
                self.allowed_types.join(", ")
            )));
        }
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let stem = generate_stem();
        let temp_path = self.temp_dir.join(&stem);
        fs::write(&temp_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Processing, "Failed to stage upload", e)
        })?;

        let result = self.publish(&stem, &temp_path).await;

        if let Err(e) = fs::remove_file(&temp_path).await {
            warn!(path = %temp_path.display(), error = %e, "Failed to remove staged upload");
        }

        result
    }

    async fn publish(&self, stem: &str, temp_path: &Path) -> AppResult<String> {
        let source = fs::read(temp_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Processing, "Failed to read staged upload", e)
        })?;

        let (blur_sigma, format, quality) = (self.blur_sigma, self.format, self.quality);
        let encoded =
            tokio::task::spawn_blocking(move || compose_square(&source, blur_sigma, format, quality))
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "Image task panicked", e)
                })??;

        let file_name = format!("{stem}.{}", format.extension());
        let output_path = self.output_dir.join(&file_name);
        fs::write(&output_path, &encoded).await.map_err(|e| {
            AppError::with_source(ErrorKind::Processing, "Failed to write image", e)
        })?;

        let public_path = format!("{}/images/{file_name}", self.public_prefix);
        debug!(
            output = %output_path.display(),
            path = %public_path,
            bytes = encoded.len(),
            "Published image"
        );
        Ok(public_path)
    }
}
