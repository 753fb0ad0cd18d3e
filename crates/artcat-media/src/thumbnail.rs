//! Upload decoding and JPEG thumbnail generation.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use artcat_core::settings::DEFAULT_THUMBNAIL_EDGE;
use artcat_core::{ImageProcessor, MediaError, ProcessedImage};

/// JPEG quality of generated thumbnails.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Produces bounded JPEG thumbnails with the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailProcessor {
    max_edge: u32,
    quality: u8,
}

impl Default for ThumbnailProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_EDGE)
    }
}

impl ThumbnailProcessor {
    pub const fn new(max_edge: u32) -> Self {
        Self {
            max_edge,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    #[must_use]
    pub const fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    fn shrink(&self, img: &DynamicImage) -> DynamicImage {
        let (width, height) = img.dimensions();
        if width <= self.max_edge && height <= self.max_edge {
            return img.clone();
        }
        img.resize(self.max_edge, self.max_edge, FilterType::Lanczos3)
    }

    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Vec<u8>, MediaError> {
        // JPEG has no alpha channel.
        let rgb = img.to_rgb8();
        let mut out = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| MediaError::Io(format!("thumbnail encoding failed: {e}")))?;
        Ok(out)
    }
}

fn canonical_extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpg",
        other => other.extensions_str().first().copied().unwrap_or("img"),
    }
}

impl ImageProcessor for ThumbnailProcessor {
    fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::InvalidImage("empty upload".to_string()));
        }
        let format = image::guess_format(bytes)
            .map_err(|e| MediaError::InvalidImage(format!("unrecognized format: {e}")))?;
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| MediaError::InvalidImage(e.to_string()))?;

        let (width, height) = img.dimensions();
        let thumbnail = self.encode_jpeg(&self.shrink(&img))?;

        Ok(ProcessedImage {
            extension: canonical_extension(format).to_string(),
            width,
            height,
            thumbnail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgba([200u8, 40, 40, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_large_image_is_bounded() {
        let processed = ThumbnailProcessor::default().process(&png(1200, 600)).unwrap();
        assert_eq!(processed.extension, "png");
        assert_eq!((processed.width, processed.height), (1200, 600));

        let thumb = image::load_from_memory(&processed.thumbnail).unwrap();
        assert_eq!(image::guess_format(&processed.thumbnail).unwrap(), ImageFormat::Jpeg);
        assert_eq!(thumb.dimensions(), (400, 200));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let processed = ThumbnailProcessor::new(400).process(&png(30, 50)).unwrap();
        let thumb = image::load_from_memory(&processed.thumbnail).unwrap();
        assert_eq!(thumb.dimensions(), (30, 50));
    }

    #[test]
    fn test_garbage_is_invalid_image() {
        let err = ThumbnailProcessor::default()
            .process(b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidImage(_)));

        let err = ThumbnailProcessor::default().process(&[]).unwrap_err();
        assert!(matches!(err, MediaError::InvalidImage(_)));
    }

    #[test]
    fn test_truncated_png_is_invalid_image() {
        let bytes = png(64, 64);
        let err = ThumbnailProcessor::default()
            .process(&bytes[..bytes.len() / 2])
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidImage(_)));
    }
}
