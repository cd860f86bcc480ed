// THEORY:
// The `pipeline` module is the top-level API for the plant-health engine. It
// wires the stages into one strictly sequential pass:
//
//   decode → convert (HSV) → segment (disease mask) → aggregate (severity) → classify
//
// Each stage is a pure transformation producing a new immutable value, so the
// stages are individually testable and nothing is shared between calls.
//
// This module is also the single fault boundary. `try_analyze` propagates any
// `AnalysisError` with `?`; `analyze_plant_health` folds every error, and any
// panic raised inside a stage, into an `Error`-status `AnalysisResult`. A caller
// always receives a structured result, never a fault.

use crate::core_modules::classifier::{AnalysisResult, classify};
use crate::core_modules::disease_mask::DiseaseMask;
use crate::core_modules::hsv::HsvGrid;
use crate::core_modules::pixel_grid::{ImageSource, PixelGrid};
use crate::core_modules::severity::severity;
use crate::error::{AnalysisError, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Analyzes one leaf image. Never fails: faults come back as `HealthStatus::Error`.
pub fn analyze_plant_health<'a>(source: impl Into<ImageSource<'a>>) -> AnalysisResult {
    let source = source.into();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| try_analyze(source)))
        .unwrap_or_else(|payload| Err(AnalysisError::ProcessingFault(panic_message(payload))));

    match outcome {
        Ok(result) => result,
        Err(error) => {
            warn!(error = %error, "plant health analysis failed");
            AnalysisResult::from_error(&error)
        }
    }
}

/// Runs the full pipeline, surfacing faults as `AnalysisError`.
pub fn try_analyze(source: ImageSource<'_>) -> Result<AnalysisResult> {
    let grid = PixelGrid::decode(source)?;
    debug!(width = grid.width(), height = grid.height(), "decoded leaf image");
    analyze_grid(&grid)
}

/// Runs the stages after decoding on an existing grid.
pub fn analyze_grid(grid: &PixelGrid) -> Result<AnalysisResult> {
    if grid.is_empty() {
        return Err(AnalysisError::EmptyImage {
            width: grid.width(),
            height: grid.height(),
        });
    }

    let hsv = HsvGrid::from_pixel_grid(grid);
    let mask = DiseaseMask::segment(&hsv);
    let severity = severity(&mask, grid.len());
    debug!(
        flagged = mask.flagged_count(),
        total = grid.len(),
        severity,
        "segmented disease signatures"
    );

    classify(severity)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic during analysis".to_string()
    }
}
