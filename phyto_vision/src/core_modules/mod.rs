pub mod classifier;
pub mod color_range;
pub mod disease_mask;
pub mod hsv;
pub mod pixel;
pub mod pixel_grid;
pub mod severity;
