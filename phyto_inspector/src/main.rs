mod targets;

use anyhow::{Result, bail};
use phyto_vision::{BatchSummary, ParallelConfig, ParallelPipeline};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "phyto_vision=info,phyto_inspector=info";

#[derive(Debug, Default, PartialEq)]
struct InspectorArgs {
    pretty: bool,
    inputs: Vec<PathBuf>,
}

impl InspectorArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--pretty" => parsed.pretty = true,
                flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
                input => parsed.inputs.push(PathBuf::from(input)),
            }
        }
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    // --- 1. Argument Parsing & Setup ---
    let args = InspectorArgs::parse(env::args().skip(1))?;
    if args.inputs.is_empty() {
        println!("Usage: phyto_inspector [--pretty] <image-or-directory>...");
        return Ok(());
    }
    let config = ParallelConfig::from_env()?;

    // --- 2. Target Discovery ---
    let targets = targets::collect_targets(&args.inputs)?;
    info!(images = targets.len(), "collected leaf images");

    // --- 3. Batch Analysis ---
    let pipeline = ParallelPipeline::new(config);
    let items = pipeline.analyze_paths(targets).await;

    // --- 4. Report ---
    for item in &items {
        let line = if args.pretty {
            serde_json::to_string_pretty(item)?
        } else {
            serde_json::to_string(item)?
        };
        println!("{line}");
    }

    let summary = BatchSummary::from_items(&items);
    info!(
        total = summary.total,
        healthy = summary.healthy,
        non_critical = summary.non_critical,
        critical = summary.critical,
        errors = summary.errors,
        "analysis complete"
    );
    if summary.has_critical() {
        warn!(critical = summary.critical, "critical infections detected");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Result<InspectorArgs> {
        InspectorArgs::parse(values.iter().map(|v| v.to_string()))
    }

    #[test]
    fn parses_inputs_and_pretty_flag() {
        let parsed = args(&["leaf.png", "--pretty", "uploads"]).unwrap();
        assert_eq!(
            parsed,
            InspectorArgs {
                pretty: true,
                inputs: vec![PathBuf::from("leaf.png"), PathBuf::from("uploads")],
            }
        );
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(args(&["--fast", "leaf.png"]).is_err());
    }
}
