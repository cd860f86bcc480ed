// THEORY:
// The `PixelGrid` is the decoder stage of the pipeline. It turns whatever the
// caller hands in (encoded bytes, a file on disk, or an already-decoded RGB
// buffer) into a single immutable grid of `Pixel`s with a fixed channel order.
//
// Key architectural principles:
// 1.  **One representation**: Every input is flattened to tightly packed 8-bit
//     RGB. Greyscale is expanded and alpha is discarded, so later stages never
//     branch on the source format.
// 2.  **Two distinct failures**: Input that cannot be parsed is `InvalidImage`;
//     input that parses but has zero area is `EmptyImage`. Nothing else is
//     validated here (no size limits, no format allow-list).
// 3.  **Ownership**: A grid belongs to exactly one pipeline invocation and is
//     never mutated after construction.

use crate::core_modules::pixel::{Byte, CHANNELS, Pixel};
use crate::error::{AnalysisError, Result};
use std::path::{Path, PathBuf};

/// Where the pixels for one analysis come from.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// Encoded image bytes (PNG, JPEG, ...). The format is guessed from content.
    Encoded(&'a [Byte]),
    /// Path to an encoded image file.
    File(&'a Path),
    /// An already-decoded, tightly packed RGB buffer.
    Rgb {
        width: u32,
        height: u32,
        data: &'a [Byte],
    },
}

impl<'a> From<&'a [Byte]> for ImageSource<'a> {
    fn from(bytes: &'a [Byte]) -> Self {
        ImageSource::Encoded(bytes)
    }
}

impl<'a> From<&'a Vec<Byte>> for ImageSource<'a> {
    fn from(bytes: &'a Vec<Byte>) -> Self {
        ImageSource::Encoded(bytes.as_slice())
    }
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        ImageSource::File(path)
    }
}

impl<'a> From<&'a PathBuf> for ImageSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        ImageSource::File(path.as_path())
    }
}

/// An immutable 2D grid of RGB pixels, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Decodes any supported source into a grid.
    pub fn decode(source: ImageSource<'_>) -> Result<Self> {
        match source {
            ImageSource::Encoded(bytes) => Self::from_encoded(bytes),
            ImageSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    AnalysisError::InvalidImage(format!("{}: {}", path.display(), e))
                })?;
                Self::from_encoded(&bytes)
            }
            ImageSource::Rgb {
                width,
                height,
                data,
            } => Self::from_rgb_bytes(width, height, data),
        }
    }

    /// Parses encoded image bytes and flattens them to RGB.
    pub fn from_encoded(bytes: &[Byte]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| AnalysisError::InvalidImage(e.to_string()))?;
        let rgb = image.into_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb_bytes(width, height, rgb.as_raw())
    }

    /// Builds a grid from a packed RGB buffer of exactly `width * height * 3` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, data: &[Byte]) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(CHANNELS))
            .ok_or_else(|| {
                AnalysisError::InvalidImage(format!("{width}x{height} overflows the address space"))
            })?;

        if data.len() != expected {
            return Err(AnalysisError::InvalidImage(format!(
                "expected {expected} bytes for a {width}x{height} RGB buffer, got {}",
                data.len()
            )));
        }
        if expected == 0 {
            return Err(AnalysisError::EmptyImage { width, height });
        }

        let pixels = data
            .chunks_exact(CHANNELS)
            .map(|bytes| Pixel::new(bytes[0], bytes[1], bytes[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Returns the pixel at column `x`, row `y`, if it is inside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }
}
