// THEORY:
// This file is the main entry point for the `phyto_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (like the `phyto_inspector`
// runner, or a web service that stores verdicts).
//
// The primary export is `analyze_plant_health`: one image in, one
// `AnalysisResult` out, with every failure folded into an `Error` status. The
// individual stages live under `core_modules` and stay public so each can be
// exercised in isolation; `parallel_pipeline` adds batch concurrency on top.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::classifier::{AnalysisResult, HealthStatus};
pub use core_modules::pixel_grid::{ImageSource, PixelGrid};
pub use error::{AnalysisError, ConfigError};
pub use parallel_pipeline::{BatchItem, BatchSummary, ParallelConfig, ParallelPipeline};
pub use pipeline::{analyze_grid, analyze_plant_health, try_analyze};
