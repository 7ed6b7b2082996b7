//! Export predictions to JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Prediction;
use crate::error::AppError;

/// A saved batch of predictions (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionExport {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub artifacts_dir: String,
    pub predictions: Vec<Prediction>,
}

impl PredictionExport {
    pub fn new(artifacts_dir: &Path, predictions: Vec<Prediction>) -> Self {
        Self {
            tool: "salary".to_string(),
            generated_at: Utc::now(),
            artifacts_dir: artifacts_dir.display().to_string(),
            predictions,
        }
    }
}

/// Write predictions to a JSON file.
pub fn write_predictions_json(path: &Path, export: &PredictionExport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::runtime(format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::runtime(format!("Failed to write export JSON: {e}")))?;
    tracing::info!(path = %path.display(), n = export.predictions.len(), "Wrote predictions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureVector, PredictionResult};

    #[test]
    fn export_contains_predictions() {
        let prediction = Prediction {
            years_of_experience: 3.0,
            level: "Mid".to_string(),
            role: "HR".to_string(),
            features: FeatureVector {
                years_of_experience: 3.0,
                level_code: 4,
                role_code: 10,
            },
            result: PredictionResult {
                avg: 2.0,
                min: 1.0,
                max: 3.0,
            },
            warnings: Vec::new(),
        };
        let path = std::env::temp_dir().join(format!("salary-export-{}.json", std::process::id()));
        let export = PredictionExport::new(Path::new("models"), vec![prediction.clone()]);
        write_predictions_json(&path, &export).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: PredictionExport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.tool, "salary");
        assert_eq!(back.predictions, vec![prediction]);
        let _ = std::fs::remove_file(&path);
    }
}
