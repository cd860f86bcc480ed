// THEORY:
// The `DiseaseMask` is the segmenter stage. It tests every HSV pixel against the
// disease signatures independently and flags the pixel if *any* band contains
// it. This is a set union: a pixel inside two overlapping bands is flagged once.
//
// There is no spatial reasoning here (no erosion, dilation or
// connected components). Each pixel's verdict depends on that pixel alone.

use crate::core_modules::color_range::{ColorRange, DISEASE_SIGNATURES};
use crate::core_modules::hsv::HsvGrid;
use tracing::trace;

/// Per-pixel disease flags, same dimensions as the source `HsvGrid`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseMask {
    width: u32,
    height: u32,
    flags: Vec<bool>,
}

impl DiseaseMask {
    /// Segments a grid with the standard disease signatures.
    pub fn segment(grid: &HsvGrid) -> Self {
        Self::segment_with(grid, &DISEASE_SIGNATURES)
    }

    /// Segments a grid against an arbitrary set of ranges (union semantics).
    pub fn segment_with(grid: &HsvGrid, ranges: &[ColorRange]) -> Self {
        let flags = grid
            .pixels()
            .iter()
            .map(|pixel| ranges.iter().any(|range| range.contains(pixel)))
            .collect();

        let mask = Self {
            width: grid.width(),
            height: grid.height(),
            flags,
        };
        trace!(
            signatures = ?signature_names(ranges),
            flagged = mask.flagged_count(),
            "applied disease signatures"
        );
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Number of pixels carrying a disease colour.
    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|&&flagged| flagged).count()
    }
}

fn signature_names(ranges: &[ColorRange]) -> Vec<&'static str> {
    ranges.iter().map(|range| range.name).collect()
}
