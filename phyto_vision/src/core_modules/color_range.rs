// THEORY:
// A `ColorRange` is a named, inclusive box in HSV space describing the colour a
// leaf takes on under one family of disease. The three signatures below
// overlap (brown and red share low hues); the segmenter only asks
// whether a pixel lies in *some* band, never which one.

use crate::core_modules::hsv::HsvPixel;

/// An inclusive lower/upper HSV bound pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub name: &'static str,
    pub lower: HsvPixel,
    pub upper: HsvPixel,
}

impl ColorRange {
    pub const fn new(name: &'static str, lower: HsvPixel, upper: HsvPixel) -> Self {
        Self { name, lower, upper }
    }

    /// True when every component lies within its bounds, ends included.
    #[inline]
    pub fn contains(&self, pixel: &HsvPixel) -> bool {
        (self.lower.hue..=self.upper.hue).contains(&pixel.hue)
            && (self.lower.saturation..=self.upper.saturation).contains(&pixel.saturation)
            && (self.lower.value..=self.upper.value).contains(&pixel.value)
    }
}

/// Yellowing and pale patches: leaf spot, powdery mildew.
pub const YELLOW_MILDEW: ColorRange = ColorRange::new(
    "Yellow/Mildew",
    HsvPixel::new(15, 50, 50),
    HsvPixel::new(35, 255, 255),
);

/// Dark brown necrosis: blight, rot.
pub const BROWN_BLIGHT: ColorRange = ColorRange::new(
    "Brown/Blight",
    HsvPixel::new(0, 20, 20),
    HsvPixel::new(15, 255, 200),
);

/// Saturated red-orange pustules: rust.
pub const RED_RUST: ColorRange = ColorRange::new(
    "Red/Rust",
    HsvPixel::new(0, 100, 100),
    HsvPixel::new(10, 255, 255),
);

pub const DISEASE_SIGNATURES: [ColorRange; 3] = [YELLOW_MILDEW, BROWN_BLIGHT, RED_RUST];
