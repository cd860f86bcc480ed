// THEORY:
// The core pipeline is synchronous and single-image. When a caller has a batch
// of leaf photographs, this module supplies the concurrency policy the core
// leaves out: how many analyses may run at once.
//
// Each image is analyzed on tokio's blocking pool (the work is CPU-bound and has
// no suspension points). A buffered stream keeps at most `workers` analyses in
// flight and yields results in input order. A worker that fails to join becomes
// an `Error` result for its own item; the batch as a whole never fails.

use crate::core_modules::classifier::{AnalysisResult, HealthStatus};
use crate::error::{AnalysisError, ConfigError};
use crate::pipeline::analyze_plant_health;
use futures::stream::{self, StreamExt};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const WORKERS_ENV: &str = "PHYTO_WORKERS";

/// Tunables for batch analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Maximum number of images analyzed concurrently.
    pub workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
        }
    }
}

impl ParallelConfig {
    /// Reads `PHYTO_WORKERS`, falling back to the CPU count when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_value(std::env::var(WORKERS_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = value else {
            return Ok(Self::default());
        };
        match raw.trim().parse::<usize>() {
            Ok(workers) if workers > 0 => Ok(Self { workers }),
            _ => Err(ConfigError::InvalidWorkers {
                name: WORKERS_ENV,
                value: raw.to_string(),
            }),
        }
    }
}

/// One analyzed image of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Non-UTF-8 bytes become U+FFFD so one odd filename cannot sink the report.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Outcome counts across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub healthy: usize,
    pub non_critical: usize,
    pub critical: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            summary.total += 1;
            match item.result.status {
                HealthStatus::Healthy => summary.healthy += 1,
                HealthStatus::NonCritical => summary.non_critical += 1,
                HealthStatus::Critical => summary.critical += 1,
                HealthStatus::Error => summary.errors += 1,
            }
            summary
        })
    }

    pub fn has_critical(&self) -> bool {
        self.critical > 0
    }
}

pub struct ParallelPipeline {
    config: ParallelConfig,
}

impl ParallelPipeline {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Analyzes every path, at most `workers` at a time, preserving input order.
    pub async fn analyze_paths(&self, paths: Vec<PathBuf>) -> Vec<BatchItem> {
        let workers = self.config.workers.max(1);
        info!(images = paths.len(), workers, "starting batch analysis");

        stream::iter(paths)
            .map(|path| async move {
                let job_path = path.clone();
                let result = tokio::task::spawn_blocking(move || analyze_plant_health(&job_path))
                    .await
                    .unwrap_or_else(|join_error| {
                        AnalysisResult::from_error(&AnalysisError::ProcessingFault(
                            join_error.to_string(),
                        ))
                    });
                debug!(path = %path.display(), status = %result.status, "analyzed image");
                BatchItem { path, result }
            })
            .buffered(workers)
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel_grid::tests::solid_png;

    fn item(status: HealthStatus) -> BatchItem {
        BatchItem {
            path: PathBuf::from("leaf.png"),
            result: AnalysisResult {
                status,
                disease_name: String::new(),
                confidence: 0.0,
                message: String::new(),
            },
        }
    }

    #[test]
    fn workers_default_to_cpu_count() {
        let config = ParallelConfig::from_value(None).unwrap();
        assert_eq!(config.workers, num_cpus::get().max(1));
    }

    #[test]
    fn workers_parse_from_env_value() {
        assert_eq!(ParallelConfig::from_value(Some(" 3 ")).unwrap().workers, 3);
    }

    #[test]
    fn zero_or_garbage_workers_are_rejected() {
        for raw in ["0", "-2", "many"] {
            let err = ParallelConfig::from_value(Some(raw)).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidWorkers {
                    name: WORKERS_ENV,
                    value: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn summary_counts_each_status() {
        let items = vec![
            item(HealthStatus::Healthy),
            item(HealthStatus::Healthy),
            item(HealthStatus::NonCritical),
            item(HealthStatus::Critical),
            item(HealthStatus::Error),
        ];
        let summary = BatchSummary::from_items(&items);
        assert_eq!(
            summary,
            BatchSummary {
                total: 5,
                healthy: 2,
                non_critical: 1,
                critical: 1,
                errors: 1,
            }
        );
        assert!(summary.has_critical());
    }

    #[test]
    fn batch_item_flattens_the_result() {
        let json = serde_json::to_value(item(HealthStatus::NonCritical)).unwrap();
        assert_eq!(json["path"], "leaf.png");
        assert_eq!(json["status"], "Non-Critical");
        assert!(json.get("result").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_serialize_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut item = item(HealthStatus::Healthy);
        item.path = PathBuf::from(OsStr::from_bytes(b"uploads/leaf\xff.png"));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["path"], "uploads/leaf\u{FFFD}.png");
        assert_eq!(json["status"], "Healthy");
    }

    #[tokio::test]
    async fn analyzes_a_batch_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let yellow = dir.path().join("yellow.png");
        let green = dir.path().join("green.png");
        let missing = dir.path().join("missing.png");
        std::fs::write(&yellow, solid_png(4, 4, [200, 150, 50])).unwrap();
        std::fs::write(&green, solid_png(4, 4, [40, 160, 60])).unwrap();

        let pipeline = ParallelPipeline::new(ParallelConfig { workers: 2 });
        let items = pipeline
            .analyze_paths(vec![yellow.clone(), missing.clone(), green.clone()])
            .await;

        let paths: Vec<_> = items.iter().map(|item| item.path.clone()).collect();
        assert_eq!(paths, vec![yellow, missing, green]);

        let statuses: Vec<_> = items.iter().map(|item| item.result.status).collect();
        assert_eq!(
            statuses,
            vec![HealthStatus::Critical, HealthStatus::Error, HealthStatus::Healthy]
        );
    }

    #[tokio::test]
    async fn empty_batch_yields_nothing() {
        let pipeline = ParallelPipeline::new(ParallelConfig { workers: 1 });
        assert!(pipeline.analyze_paths(Vec::new()).await.is_empty());
    }
}
