// THEORY:
// Every stage of the plant-health pipeline reports failure through one closed
// error type. The pipeline boundary (`pipeline::analyze_plant_health`) is the
// only place these errors are turned into `Error`-status results, so a stage
// never has to know how a failure is presented to the caller.

use thiserror::Error;

/// A fault raised while analyzing a single image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The input could not be read or parsed as an image.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// The image decoded, but it has no pixels to analyze.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    /// Any other failure during conversion, segmentation or aggregation.
    #[error("{0}")]
    ProcessingFault(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Invalid runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidWorkers { name: &'static str, value: String },
}
