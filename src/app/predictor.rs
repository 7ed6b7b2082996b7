//! Shared prediction logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! encode level/role -> build feature vector -> run avg/min/max regressors
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::Path;

use rayon::prelude::*;

use crate::domain::{CategoryType, ExperienceRange, FeatureVector, Prediction, PredictionResult};
use crate::error::AppError;
use crate::io::artifacts::{ArtifactSet, load_artifacts};

/// Read-only prediction context, built once at startup.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: ArtifactSet,
}

impl Predictor {
    pub fn new(artifacts: ArtifactSet) -> Self {
        Self { artifacts }
    }

    /// Load the artifact directory and wrap it.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        load_artifacts(dir).map(Self::new)
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Predict avg/min/max salary for one set of inputs.
    ///
    /// Unseen labels are encoded with the encoder's default class and reported
    /// in `Prediction::warnings`. `years` is passed through unchecked.
    pub fn predict_salaries(&self, years: f64, level: &str, role: &str) -> Result<Prediction, AppError> {
        let level_res = self.artifacts.level_encoder.resolve(level, CategoryType::Level);
        let role_res = self.artifacts.role_encoder.resolve(role, CategoryType::Role);

        let features = FeatureVector {
            years_of_experience: years,
            level_code: level_res.code,
            role_code: role_res.code,
        };
        let row = features.to_row();

        let result = PredictionResult {
            avg: self.artifacts.avg_model.predict(&row)?,
            min: self.artifacts.min_model.predict(&row)?,
            max: self.artifacts.max_model.predict(&row)?,
        };
        tracing::debug!(years, level, role, ?features, ?result, "Predicted salaries");

        let warnings = [level_res.warning, role_res.warning]
            .into_iter()
            .flatten()
            .collect();

        Ok(Prediction {
            years_of_experience: years,
            level: level.to_string(),
            role: role.to_string(),
            features,
            result,
            warnings,
        })
    }

    /// Predict for many roles at once; output order follows `roles`.
    pub fn predict_table<S>(&self, years: f64, level: &str, roles: &[S]) -> Result<Vec<Prediction>, AppError>
    where
        S: AsRef<str> + Sync,
    {
        roles
            .par_iter()
            .map(|role| self.predict_salaries(years, level, role.as_ref()))
            .collect()
    }

    /// Predictions for every whole year in `range`, used for the salary chart.
    pub fn salary_curve(
        &self,
        level: &str,
        role: &str,
        range: ExperienceRange,
    ) -> Result<Vec<(u32, PredictionResult)>, AppError> {
        range
            .years()
            .map(|y| {
                self.predict_salaries(f64::from(y), level, role)
                    .map(|p| (y, p.result))
            })
            .collect()
    }
}
