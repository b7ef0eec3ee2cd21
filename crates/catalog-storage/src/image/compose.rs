//! Blurred-square composition and encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat};

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;

/// Encoded output format for composed pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JPEG at the configured quality.
    Jpeg,
    /// Lossless WebP.
    WebP,
    /// PNG.
    Png,
}

impl OutputFormat {
    /// Parse the `images.output_format` setting.
    pub fn from_config(value: &str) -> AppResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "webp" => Ok(Self::WebP),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(AppError::configuration(format!(
                "Unknown image output format: '{other}'. Supported: webp, jpeg, png"
            ))),
        }
    }

    /// Whether the encoder takes the `quality` setting into account.
    pub fn honours_quality(&self) -> bool {
        matches!(self, Self::Jpeg)
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Decode `data`, place it centered on a blurred cover-fit copy of itself
/// sized `max(width, height)` square, and encode the result.
pub fn compose_square(
    data: &[u8],
    blur_sigma: f32,
    format: OutputFormat,
    quality: u8,
) -> AppResult<Vec<u8>> {
    let source = image::load_from_memory(data).map_err(|e| {
        AppError::with_source(ErrorKind::Processing, "Failed to decode image", e)
    })?;

    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(AppError::processing("Image has no pixels"));
    }
    let size = width.max(height);

    let background = source
        .resize_to_fill(size, size, FilterType::Triangle)
        .blur(blur_sigma);
    let foreground = source.resize(size, size, FilterType::Lanczos3);

    let mut canvas = background.to_rgba8();
    let x = (size - foreground.width()) / 2;
    let y = (size - foreground.height()) / 2;
    imageops::overlay(&mut canvas, &foreground.to_rgba8(), i64::from(x), i64::from(y));

    encode(DynamicImage::ImageRgba8(canvas), format, quality)
}

fn encode(image: DynamicImage, format: OutputFormat, quality: u8) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let result = match format {
        OutputFormat::WebP => image.write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP),
        OutputFormat::Png => image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png),
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.min(100)))
        }
    };
    result.map_err(|e| AppError::with_source(ErrorKind::Processing, "Failed to encode image", e))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_wide_image_becomes_square() {
        let out = compose_square(&png(30, 10, [220, 0, 0, 255]), 4.0, OutputFormat::Png, 70).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (30, 30));

        let center = decoded.to_rgba8().get_pixel(15, 15).0;
        assert!(center[0] > 200 && center[1] < 30);
    }

    #[test]
    fn test_tall_image_becomes_square_webp() {
        let out = compose_square(&png(8, 24, [0, 0, 200, 255]), 2.0, OutputFormat::WebP, 70).unwrap();
        let decoded = image::load_from_memory_with_format(&out, ImageFormat::WebP).unwrap();
        assert_eq!(decoded.dimensions(), (24, 24));
    }

    #[test]
    fn test_jpeg_output() {
        let out = compose_square(&png(16, 16, [10, 200, 10, 255]), 1.0, OutputFormat::Jpeg, 70).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_jpeg_quality_changes_output() {
        let mut img = RgbaImage::new(64, 64);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
        }
        let mut source = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut source), ImageFormat::Png)
            .unwrap();

        let low = compose_square(&source, 1.0, OutputFormat::Jpeg, 5).unwrap();
        let high = compose_square(&source, 1.0, OutputFormat::Jpeg, 95).unwrap();
        assert_ne!(low, high);
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_only_jpeg_honours_quality() {
        assert!(OutputFormat::Jpeg.honours_quality());
        assert!(!OutputFormat::WebP.honours_quality());
        assert!(!OutputFormat::Png.honours_quality());
    }

    #[test]
    fn test_garbage_is_processing_error() {
        let err = compose_square(b"not an image", 1.0, OutputFormat::Png, 70).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Processing);
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("WEBP").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_config("jpg").unwrap().extension(), "jpg");
        assert_eq!(
            OutputFormat::from_config("gif").unwrap_err().kind,
            ErrorKind::Configuration
        );
    }
}
