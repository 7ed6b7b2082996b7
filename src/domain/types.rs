//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the form, the CLI, and the predictor
//! - printed as JSON by `salary predict --json`
//! - reused by tests without touching artifacts

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Seniority level, in the order the form offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Level {
    Associate,
    Junior,
    Mid,
    Senior,
    Lead,
    Manager,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Associate,
        Level::Junior,
        Level::Mid,
        Level::Senior,
        Level::Lead,
        Level::Manager,
    ];

    /// Label as stored in the level encoder.
    pub fn label(self) -> &'static str {
        match self {
            Level::Associate => "Associate",
            Level::Junior => "Junior",
            Level::Mid => "Mid",
            Level::Senior => "Senior",
            Level::Lead => "Lead",
            Level::Manager => "Manager",
        }
    }

    /// Valid years of experience for this level (inclusive).
    pub fn experience_range(self) -> ExperienceRange {
        let (min, max) = match self {
            Level::Associate => (0, 2),
            Level::Junior => (0, 4),
            Level::Mid => (2, 7),
            Level::Senior => (4, 10),
            Level::Lead => (7, 15),
            Level::Manager => (8, 20),
        };
        ExperienceRange { min, max }
    }

    pub fn from_label(label: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.label() == label)
    }

    pub fn next(self) -> Level {
        let idx = Level::ALL.iter().position(|&l| l == self).unwrap_or(0);
        Level::ALL[(idx + 1) % Level::ALL.len()]
    }

    pub fn prev(self) -> Level {
        let idx = Level::ALL.iter().position(|&l| l == self).unwrap_or(0);
        Level::ALL[(idx + Level::ALL.len() - 1) % Level::ALL.len()]
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive `[min, max]` years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRange {
    pub min: u32,
    pub max: u32,
}

impl ExperienceRange {
    /// Range used for any level label missing from the static table.
    pub const FALLBACK: ExperienceRange = ExperienceRange { min: 0, max: 20 };

    pub fn contains(self, years: u32) -> bool {
        (self.min..=self.max).contains(&years)
    }

    pub fn clamp(self, years: u32) -> u32 {
        years.clamp(self.min, self.max)
    }

    pub fn years(self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

/// Experience bounds for a free-form level label.
pub fn experience_range_for(label: &str) -> ExperienceRange {
    Level::from_label(label)
        .map(Level::experience_range)
        .unwrap_or(ExperienceRange::FALLBACK)
}

/// Roles offered by the form.
pub const ROLES: [&str; 29] = [
    ".NET Developer",
    "Accounting",
    "Android Developer",
    "Business Analyst",
    "Call Center",
    "Data Engineer",
    "Data Scientist",
    "DevOps Engineer",
    "Flutter Developer",
    "Frontend Developer",
    "HR",
    "iOS Developer",
    "Java Developer",
    "Machine Learning Engineer",
    "PHP Developer",
    "Presales Officer",
    "Product Manager",
    "Product Owner",
    "Project Manager",
    "Python Developer",
    "Quality Assurance Engineer",
    "R&D",
    "Regional Manager",
    "RPA Developer",
    "Sales Account Manager",
    "SysAdmin Engineer",
    "System Analyst",
    "Technical Support Engineer",
    "UI/UX Engineer",
];

/// Numeric model input: `[years_of_experience, level_code, role_code]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub years_of_experience: f64,
    pub level_code: i64,
    pub role_code: i64,
}

impl FeatureVector {
    pub const WIDTH: usize = 3;

    pub fn to_row(self) -> [f64; Self::WIDTH] {
        [
            self.years_of_experience,
            self.level_code as f64,
            self.role_code as f64,
        ]
    }
}

/// Raw outputs of the three regressors.
///
/// No ordering between `min`, `avg` and `max` is guaranteed; each value comes
/// from an independently trained model and is reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Which encoder a label was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Level,
    Role,
}

impl CategoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Level => "level",
            CategoryType::Role => "role",
        }
    }
}

/// A label that the encoder never saw during training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnseenCategory {
    pub category_type: CategoryType,
    pub label: String,
}

impl std::fmt::Display for UnseenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unseen {} '{}' detected. Using a default category for prediction.",
            self.category_type.as_str(),
            self.label
        )
    }
}

/// A complete prediction: inputs, encoded features, outputs, and warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub years_of_experience: f64,
    pub level: String,
    pub role: String,
    pub features: FeatureVector,
    pub result: PredictionResult,
    pub warnings: Vec<UnseenCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ranges_match_table() {
        let expected = [(0, 2), (0, 4), (2, 7), (4, 10), (7, 15), (8, 20)];
        for (level, (min, max)) in Level::ALL.into_iter().zip(expected) {
            assert_eq!(level.experience_range(), ExperienceRange { min, max }, "{level}");
            assert_eq!(experience_range_for(level.label()), ExperienceRange { min, max });
        }
    }

    #[test]
    fn unknown_level_label_uses_fallback_range() {
        assert_eq!(experience_range_for("Principal"), ExperienceRange::FALLBACK);
        assert_eq!(experience_range_for("mid"), ExperienceRange::FALLBACK);
    }

    #[test]
    fn level_cycling_wraps() {
        assert_eq!(Level::Manager.next(), Level::Associate);
        assert_eq!(Level::Associate.prev(), Level::Manager);
        assert_eq!(Level::Mid.next(), Level::Senior);
    }

    #[test]
    fn range_clamp_stays_inside() {
        let r = Level::Lead.experience_range();
        assert_eq!(r.clamp(0), 7);
        assert_eq!(r.clamp(30), 15);
        assert_eq!(r.clamp(9), 9);
        assert_eq!(r.years().count(), 9);
    }

    #[test]
    fn unseen_message_names_label_and_type() {
        let w = UnseenCategory {
            category_type: CategoryType::Role,
            label: "Astronaut".to_string(),
        };
        assert_eq!(
            w.to_string(),
            "Unseen role 'Astronaut' detected. Using a default category for prediction."
        );
    }

    #[test]
    fn feature_row_order() {
        let f = FeatureVector {
            years_of_experience: 5.0,
            level_code: 3,
            role_code: 6,
        };
        assert_eq!(f.to_row(), [5.0, 3.0, 6.0]);
    }
}
