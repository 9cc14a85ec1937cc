//! Image decoding for downloaded gallery images.
//! Supports JPG, PNG and WEBP bodies.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use image::imageops::FilterType;
use image::GenericImageView;

use crate::error::{Error, Result};

/// Default cap on the longest texture side, in pixels.
pub const DEFAULT_MAX_TEXTURE_SIDE: u32 = 4096;

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a decoded image, used by renderers to cache textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    fn next() -> Self {
        Self(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A decoded RGBA8 image ready for upload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    id: ImageId,
    pub pixels: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    /// Wrap raw RGBA8 pixels. Fails if the buffer does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(Error::Decode(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            id: ImageId::next(),
            pixels: pixels.into(),
            width,
            height,
        })
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Size in pixels, treated as logical points when drawing
    pub fn size(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

/// Turns a response body into an image.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;
}

/// Decoder backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct RasterDecoder {
    /// Oversized images are downscaled to fit; 0 disables the cap.
    pub max_texture_side: u32,
}

impl Default for RasterDecoder {
    fn default() -> Self {
        Self {
            max_texture_side: DEFAULT_MAX_TEXTURE_SIDE,
        }
    }
}

impl RasterDecoder {
    pub fn new(max_texture_side: u32) -> Self {
        Self { max_texture_side }
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let img = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;

        let max_side = self.max_texture_side;
        let (w, h) = img.dimensions();
        let img = if max_side > 0 && (w > max_side || h > max_side) {
            // Preserve aspect ratio; `resize` interprets (max_width, max_height).
            img.resize(max_side, max_side, FilterType::Lanczos3)
        } else {
            img
        };

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        DecodedImage::from_rgba(width, height, rgba.into_raw())
    }
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode test png");
    out.into_inner()
}
