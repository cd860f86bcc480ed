// THEORY:
// The classifier maps a severity score onto one of a closed set of health
// outcomes. It is modelled as an ordered decision list rather than nested
// conditionals: `SEVERITY_BANDS` is scanned top to bottom and the first band
// whose exclusive upper edge lies above the severity wins. A boundary value
// therefore always belongs to the *higher* band (3.0 is not Healthy).
//
// The disease label comes from severity alone, not from which colour signature
// contributed most coverage.
//
// Failures from earlier stages never reach the caller as errors. They are folded
// into an `Error`-status `AnalysisResult` by `AnalysisResult::from_error`, so
// every invocation resolves to exactly one `HealthStatus`.

use crate::core_modules::severity::{Confidence, Severity, confidence};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of outcomes for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    #[serde(rename = "Non-Critical")]
    NonCritical,
    Critical,
    Error,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::NonCritical => "Non-Critical",
            HealthStatus::Critical => "Critical",
            HealthStatus::Error => "Error",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sole externally visible output of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: HealthStatus,
    pub disease_name: String,
    pub confidence: Confidence,
    pub message: String,
}

impl AnalysisResult {
    /// Folds a pipeline fault into a well-formed `Error` result.
    pub fn from_error(error: &AnalysisError) -> Self {
        let (disease_name, message) = match error {
            AnalysisError::InvalidImage(_) => (
                "Invalid Image",
                "Could not read the image. Please check the file.".to_string(),
            ),
            AnalysisError::EmptyImage { .. } => (
                "Empty Image",
                "Image appears to be empty or corrupted.".to_string(),
            ),
            AnalysisError::ProcessingFault(description) => (
                "Processing Error",
                format!("Error analyzing image: {description}"),
            ),
        };

        Self {
            status: HealthStatus::Error,
            disease_name: disease_name.to_string(),
            confidence: 0.0,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == HealthStatus::Error
    }
}

/// One entry of the decision list: severities below `upper_exclusive` match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBand {
    pub upper_exclusive: Severity,
    pub status: HealthStatus,
    pub disease_name: &'static str,
    pub message: &'static str,
}

pub static SEVERITY_BANDS: [SeverityBand; 4] = [
    SeverityBand {
        upper_exclusive: 3.0,
        status: HealthStatus::Healthy,
        disease_name: "No Disease Detected",
        message: "Your plant appears to be healthy! Continue with regular care and monitoring.",
    },
    SeverityBand {
        upper_exclusive: 10.0,
        status: HealthStatus::NonCritical,
        disease_name: "Leaf Spot / Powdery Mildew",
        message: "Minor infection detected. Recommended: Apply fungicide spray and improve air circulation.",
    },
    SeverityBand {
        upper_exclusive: 25.0,
        status: HealthStatus::NonCritical,
        disease_name: "Early Blight / Rust",
        message: "Moderate infection detected. Remove affected leaves and apply appropriate treatment.",
    },
    SeverityBand {
        upper_exclusive: f64::INFINITY,
        status: HealthStatus::Critical,
        disease_name: "Severe Blight / Rot",
        message: "Critical infection detected! Immediate action needed: Isolate plant, remove affected parts, and apply strong fungicide.",
    },
];

/// First band in priority order that accepts `severity`.
pub fn band_for(severity: Severity) -> Option<&'static SeverityBand> {
    SEVERITY_BANDS
        .iter()
        .find(|band| severity < band.upper_exclusive)
}

/// Maps a severity percentage to its health verdict.
pub fn classify(severity: Severity) -> Result<AnalysisResult> {
    if !(0.0..=100.0).contains(&severity) {
        return Err(AnalysisError::ProcessingFault(format!(
            "severity {severity} is outside [0, 100]"
        )));
    }
    let band = band_for(severity).ok_or_else(|| {
        AnalysisError::ProcessingFault(format!("no severity band accepts {severity}"))
    })?;

    Ok(AnalysisResult {
        status: band.status,
        disease_name: band.disease_name.to_string(),
        confidence: confidence(severity),
        message: band.message.to_string(),
    })
}
