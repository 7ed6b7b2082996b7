//! Read/write the artifact directory.
//!
//! The directory holds five JSON files with fixed names: three regressors
//! (avg/min/max salary) and two label encoders (level, role). Loading is
//! all-or-nothing: the first missing or invalid file aborts with an error
//! naming it.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{FeatureVector, Level, ROLES};
use crate::error::AppError;
use crate::models::{CategoryEncoder, LinearRegressor, Regressor};

pub const AVG_MODEL_FILE: &str = "salary_prediction_avg_model.json";
pub const MIN_MODEL_FILE: &str = "salary_prediction_min_model.json";
pub const MAX_MODEL_FILE: &str = "salary_prediction_max_model.json";
pub const LEVEL_ENCODER_FILE: &str = "level_encoder.json";
pub const ROLE_ENCODER_FILE: &str = "role_encoder.json";

pub const ARTIFACT_FILES: [&str; 5] = [
    AVG_MODEL_FILE,
    MIN_MODEL_FILE,
    MAX_MODEL_FILE,
    LEVEL_ENCODER_FILE,
    ROLE_ENCODER_FILE,
];

/// Everything needed to serve predictions, as loaded from disk.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub avg_model: Regressor,
    pub min_model: Regressor,
    pub max_model: Regressor,
    pub level_encoder: CategoryEncoder,
    pub role_encoder: CategoryEncoder,
}

/// Load all five artifacts from `dir`.
pub fn load_artifacts(dir: &Path) -> Result<ArtifactSet, AppError> {
    let set = ArtifactSet {
        avg_model: load_model(&dir.join(AVG_MODEL_FILE))?,
        min_model: load_model(&dir.join(MIN_MODEL_FILE))?,
        max_model: load_model(&dir.join(MAX_MODEL_FILE))?,
        level_encoder: read_json(&dir.join(LEVEL_ENCODER_FILE))?,
        role_encoder: read_json(&dir.join(ROLE_ENCODER_FILE))?,
    };
    tracing::info!(
        dir = %dir.display(),
        levels = set.level_encoder.classes().len(),
        roles = set.role_encoder.classes().len(),
        "Loaded salary models and encoders"
    );
    Ok(set)
}

fn load_model(path: &Path) -> Result<Regressor, AppError> {
    let model: Regressor = read_json(path)?;
    model.validate().map_err(|e| AppError::artifact(path, e))?;
    if model.n_features() != FeatureVector::WIDTH {
        tracing::warn!(
            path = %path.display(),
            n_features = model.n_features(),
            "Model input width differs from the feature vector; predictions will fail"
        );
    }
    Ok(model)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::file_not_found(path),
        _ => AppError::artifact(path, e),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| AppError::artifact(path, e))
}

/// Write an artifact set into `dir`, creating it if needed.
///
/// Returns the paths written, in [`ARTIFACT_FILES`] order.
pub fn write_artifacts(dir: &Path, set: &ArtifactSet) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::runtime(format!("Failed to create artifact dir '{}': {e}", dir.display()))
    })?;

    let paths = vec![
        write_json(&dir.join(AVG_MODEL_FILE), &set.avg_model)?,
        write_json(&dir.join(MIN_MODEL_FILE), &set.min_model)?,
        write_json(&dir.join(MAX_MODEL_FILE), &set.max_model)?,
        write_json(&dir.join(LEVEL_ENCODER_FILE), &set.level_encoder)?,
        write_json(&dir.join(ROLE_ENCODER_FILE), &set.role_encoder)?,
    ];
    Ok(paths)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::runtime(format!("Failed to write '{}': {e}", path.display())))?;
    Ok(path.to_path_buf())
}

/// An illustrative artifact set with hand-picked linear coefficients.
///
/// Encoders use the fixed level and role vocabularies. The coefficients are
/// not fitted to any data; they only make the tool usable without real models.
pub fn demo_artifacts() -> Result<ArtifactSet, AppError> {
    let level_encoder = CategoryEncoder::fit(Level::ALL.map(Level::label))
        .map_err(|e| AppError::runtime(format!("Invalid demo level vocabulary: {e}")))?;
    let role_encoder = CategoryEncoder::fit(ROLES)
        .map_err(|e| AppError::runtime(format!("Invalid demo role vocabulary: {e}")))?;

    let linear = |intercept: f64, years: f64, level: f64, role: f64| {
        Regressor::Linear(LinearRegressor {
            n_features: FeatureVector::WIDTH,
            intercept,
            coefficients: vec![years, level, role],
        })
    };

    Ok(ArtifactSet {
        avg_model: linear(6_000.0, 1_150.0, 220.0, 35.0),
        min_model: linear(4_200.0, 820.0, 150.0, 25.0),
        max_model: linear(8_300.0, 1_600.0, 310.0, 50.0),
        level_encoder,
        role_encoder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "salary-predict-artifacts-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn written_artifacts_load_back() {
        let dir = scratch_dir("roundtrip");
        let paths = write_artifacts(&dir, &demo_artifacts().unwrap()).unwrap();
        assert_eq!(paths.len(), ARTIFACT_FILES.len());

        let set = load_artifacts(&dir).unwrap();
        assert_eq!(set.role_encoder.classes().len(), ROLES.len());
        assert_eq!(set.level_encoder.encode("Associate"), Some(0));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn each_missing_file_reports_not_found() {
        let dir = scratch_dir("missing");
        let demo = demo_artifacts().unwrap();
        for name in ARTIFACT_FILES {
            write_artifacts(&dir, &demo).unwrap();
            fs::remove_file(dir.join(name)).unwrap();

            let err = load_artifacts(&dir).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{name}");
            assert!(err.message().contains(name), "{err}");
        }
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_reports_artifact_error() {
        let dir = scratch_dir("corrupt");
        write_artifacts(&dir, &demo_artifacts().unwrap()).unwrap();
        fs::write(dir.join(ROLE_ENCODER_FILE), b"\x80\x04not json").unwrap();

        let err = load_artifacts(&dir).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Artifact);
        assert!(err.message().starts_with("An error occurred while loading"));
        assert!(err.message().contains(ROLE_ENCODER_FILE));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn model_with_other_width_still_loads() {
        let dir = scratch_dir("width");
        let mut demo = demo_artifacts().unwrap();
        demo.max_model = Regressor::Linear(LinearRegressor {
            n_features: 2,
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        });
        write_artifacts(&dir, &demo).unwrap();

        let set = load_artifacts(&dir).unwrap();
        assert_eq!(set.max_model.n_features(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn structurally_invalid_model_is_rejected() {
        let dir = scratch_dir("invalid");
        write_artifacts(&dir, &demo_artifacts().unwrap()).unwrap();
        fs::write(
            dir.join(MIN_MODEL_FILE),
            r#"{"kind": "linear", "n_features": 3, "intercept": 1.0, "coefficients": [1.0]}"#,
        )
        .unwrap();

        let err = load_artifacts(&dir).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Artifact);
        assert!(err.message().contains(MIN_MODEL_FILE));
        let _ = fs::remove_dir_all(&dir);
    }
}
