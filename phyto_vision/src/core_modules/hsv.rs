// THEORY (Colour-Space Conversion):
// Disease signatures are described as hue/saturation/value bands because hue is
// far less sensitive to illumination than raw RGB. This module re-expresses a
// `PixelGrid` as an `HsvGrid` using the 8-bit quantization common to vision
// libraries:
//   • hue        0..179  (half-degree units, so a full wheel fits in a byte)
//   • saturation 0..255
//   • value      0..255  (the brightest channel)
//
// The transform is fixed-point, not floating-point. Saturation and hue are
// computed by multiplying with 12-bit reciprocal tables and rounding with a
// half-unit bias before the shift. The output is bit-for-bit identical on
// every platform.
//
// The reciprocal tables are built once into `OnceLock` LUTs; the per-pixel hot
// path is two lookups, two multiplies and two shifts.

use crate::core_modules::pixel::Pixel;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::error::{AnalysisError, Result};
use std::sync::OnceLock;

pub type Hue = u8;
pub type Saturation = u8;
pub type Value = u8;

/// Number of hue steps on the 8-bit wheel (two degrees per step).
pub const HUE_RANGE: i32 = 180;

const HSV_SHIFT: u32 = 12;
const ROUNDING_BIAS: i32 = 1 << (HSV_SHIFT - 1);

static SATURATION_DIVISORS: OnceLock<[i32; 256]> = OnceLock::new();
static HUE_DIVISORS: OnceLock<[i32; 256]> = OnceLock::new();

fn saturation_divisors() -> &'static [i32; 256] {
    SATURATION_DIVISORS.get_or_init(|| {
        let mut table = [0i32; 256];
        for (i, entry) in table.iter_mut().enumerate().skip(1) {
            *entry = ((255 << HSV_SHIFT) as f64 / i as f64).round() as i32;
        }
        table
    })
}

fn hue_divisors() -> &'static [i32; 256] {
    HUE_DIVISORS.get_or_init(|| {
        let mut table = [0i32; 256];
        for (i, entry) in table.iter_mut().enumerate().skip(1) {
            *entry = ((HUE_RANGE << HSV_SHIFT) as f64 / (6.0 * i as f64)).round() as i32;
        }
        table
    })
}

/// A single pixel in quantized HSV form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HsvPixel {
    pub hue: Hue,
    pub saturation: Saturation,
    pub value: Value,
}

impl HsvPixel {
    pub const fn new(hue: Hue, saturation: Saturation, value: Value) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

impl From<&Pixel> for HsvPixel {
    fn from(pixel: &Pixel) -> Self {
        let (r, g, b) = (pixel.red as i32, pixel.green as i32, pixel.blue as i32);
        let value = pixel.max_channel() as i32;
        let diff = value - pixel.min_channel() as i32;

        let saturation =
            (diff * saturation_divisors()[value as usize] + ROUNDING_BIAS) >> HSV_SHIFT;

        // Sector numerator in units of `diff`: red max → 0, green max → 2, blue max → 4.
        let numerator = if value == r {
            g - b
        } else if value == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let mut hue = (numerator * hue_divisors()[diff as usize] + ROUNDING_BIAS) >> HSV_SHIFT;
        if hue < 0 {
            hue += HUE_RANGE;
        }

        HsvPixel::new(hue as Hue, saturation as Saturation, value as Value)
    }
}

/// The HSV view of a `PixelGrid`, same dimensions, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvGrid {
    width: u32,
    height: u32,
    pixels: Vec<HsvPixel>,
}

impl HsvGrid {
    /// Converts every pixel of the grid. Pure and deterministic.
    pub fn from_pixel_grid(grid: &PixelGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            pixels: grid.pixels().iter().map(HsvPixel::from).collect(),
        }
    }

    /// Builds a grid directly from HSV samples; `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<HsvPixel>) -> Result<Self> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(AnalysisError::InvalidImage(format!(
                "expected {width}x{height} HSV pixels, got {}",
                pixels.len()
            )));
        }
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

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[HsvPixel] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(r: u8, g: u8, b: u8) -> HsvPixel {
        HsvPixel::from(&Pixel::new(r, g, b))
    }

    #[test]
    fn primaries() {
        assert_eq!(hsv(255, 0, 0), HsvPixel::new(0, 255, 255));
        assert_eq!(hsv(0, 255, 0), HsvPixel::new(60, 255, 255));
        assert_eq!(hsv(0, 0, 255), HsvPixel::new(120, 255, 255));
    }

    #[test]
    fn greys_have_no_hue_or_saturation() {
        assert_eq!(hsv(0, 0, 0), HsvPixel::new(0, 0, 0));
        assert_eq!(hsv(128, 128, 128), HsvPixel::new(0, 0, 128));
        assert_eq!(hsv(255, 255, 255), HsvPixel::new(0, 0, 255));
    }

    #[test]
    fn leaf_tones() {
        // Yellowed tissue.
        assert_eq!(hsv(200, 150, 50), HsvPixel::new(20, 191, 200));
        // Dry brown lesion.
        assert_eq!(hsv(120, 70, 30), HsvPixel::new(13, 191, 120));
        // Rust pustule.
        assert_eq!(hsv(200, 30, 20), HsvPixel::new(2, 229, 200));
        // Pale healthy green.
        assert_eq!(hsv(245, 250, 245), HsvPixel::new(60, 5, 250));
    }

    #[test]
    fn magenta_wraps_below_the_top_of_the_wheel() {
        // Red is max and blue exceeds green, so the raw hue is negative and wraps.
        let pixel = hsv(255, 0, 250);
        assert!(pixel.hue >= 150 && pixel.hue < 180, "hue {}", pixel.hue);
    }

    #[test]
    fn hue_stays_on_the_8bit_wheel() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let pixel = hsv(r as u8, g as u8, b as u8);
                    assert!((pixel.hue as i32) < HUE_RANGE);
                }
            }
        }
    }

    #[test]
    fn grid_preserves_dimensions() {
        let data = [200, 150, 50, 0, 255, 0, 0, 0, 255, 10, 10, 10, 1, 2, 3, 4, 5, 6];
        let grid = PixelGrid::from_rgb_bytes(3, 2, &data).unwrap();
        let hsv = HsvGrid::from_pixel_grid(&grid);
        assert_eq!((hsv.width(), hsv.height(), hsv.len()), (3, 2, 6));
        assert_eq!(hsv.pixels()[0], HsvPixel::new(20, 191, 200));
        assert_eq!(hsv, HsvGrid::from_pixel_grid(&grid));
    }

    #[test]
    fn mismatched_sample_count_is_invalid() {
        let err = HsvGrid::from_pixels(2, 2, vec![HsvPixel::new(0, 0, 0); 3]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidImage("expected 2x2 HSV pixels, got 3".to_string())
        );
        assert!(HsvGrid::from_pixels(2, 2, vec![HsvPixel::new(0, 0, 0); 4]).is_ok());
    }
}
