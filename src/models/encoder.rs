//! Label encoders for the categorical inputs.
//!
//! An encoder artifact is a JSON object with the trained vocabulary in code
//! order:
//!
//! ```text
//! { "classes": ["Associate", "Junior", "Lead", "Manager", "Mid", "Senior"] }
//! ```
//!
//! The code of a label is its index in `classes`. The first class is the
//! fallback used for labels the encoder never saw.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryType, UnseenCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EncoderFile", into = "EncoderFile")]
pub struct CategoryEncoder {
    classes: Vec<String>,
    codes: HashMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EncoderFile {
    classes: Vec<String>,
}

impl TryFrom<EncoderFile> for CategoryEncoder {
    type Error = String;

    fn try_from(file: EncoderFile) -> Result<Self, Self::Error> {
        CategoryEncoder::new(file.classes)
    }
}

impl From<CategoryEncoder> for EncoderFile {
    fn from(encoder: CategoryEncoder) -> Self {
        EncoderFile {
            classes: encoder.classes,
        }
    }
}

/// Outcome of resolving a label against an encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub code: i64,
    pub warning: Option<UnseenCategory>,
}

impl CategoryEncoder {
    /// Build an encoder from classes in code order.
    ///
    /// Fails on an empty vocabulary or duplicate labels.
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("encoder has no classes".to_string());
        }
        let mut codes = HashMap::with_capacity(classes.len());
        for (idx, label) in classes.iter().enumerate() {
            if codes.insert(label.clone(), idx as i64).is_some() {
                return Err(format!("duplicate class '{label}'"));
            }
        }
        Ok(Self { classes, codes })
    }

    /// Build an encoder the way a fitted label encoder orders its classes (sorted).
    pub fn fit<I, S>(labels: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self::new(classes)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    pub fn encode(&self, label: &str) -> Option<i64> {
        self.codes.get(label).copied()
    }

    pub fn decode(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
    }

    /// The label substituted for unseen input.
    pub fn default_label(&self) -> &str {
        &self.classes[0]
    }

    pub fn default_code(&self) -> i64 {
        0
    }

    /// Encode `label`, falling back to the default code for unseen labels.
    pub fn resolve(&self, label: &str, category_type: CategoryType) -> Resolved {
        if let Some(code) = self.encode(label) {
            return Resolved {
                code,
                warning: None,
            };
        }

        let warning = UnseenCategory {
            category_type,
            label: label.to_string(),
        };
        tracing::warn!(
            category = category_type.as_str(),
            label,
            fallback = self.default_label(),
            "{warning}"
        );
        Resolved {
            code: self.default_code(),
            warning: Some(warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ROLES;

    fn levels() -> CategoryEncoder {
        CategoryEncoder::fit(["Associate", "Junior", "Mid", "Senior", "Lead", "Manager"]).unwrap()
    }

    #[test]
    fn fit_sorts_classes() {
        let enc = levels();
        assert_eq!(
            enc.classes(),
            ["Associate", "Junior", "Lead", "Manager", "Mid", "Senior"]
        );
        assert_eq!(enc.encode("Mid"), Some(4));
        assert_eq!(enc.decode(4), Some("Mid"));
        assert_eq!(enc.decode(-1), None);
        assert_eq!(enc.decode(6), None);
    }

    #[test]
    fn known_labels_resolve_to_trained_code() {
        let enc = CategoryEncoder::fit(ROLES).unwrap();
        for role in ROLES {
            let resolved = enc.resolve(role, CategoryType::Role);
            assert_eq!(Some(resolved.code), enc.encode(role));
            assert!(resolved.warning.is_none(), "{role}");
        }
    }

    #[test]
    fn unseen_label_falls_back_with_one_warning() {
        let enc = levels();
        let resolved = enc.resolve("Principal", CategoryType::Level);
        assert_eq!(resolved.code, enc.encode("Associate").unwrap());
        assert_eq!(
            resolved.warning,
            Some(UnseenCategory {
                category_type: CategoryType::Level,
                label: "Principal".to_string(),
            })
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let enc = levels();
        assert!(enc.contains("Mid"));
        assert!(!enc.contains("mid"));
    }

    #[test]
    fn rejects_empty_and_duplicate_vocabularies() {
        assert!(CategoryEncoder::new(Vec::new()).is_err());
        assert!(CategoryEncoder::new(vec!["a".into(), "a".into()]).is_err());
    }

    #[test]
    fn json_shape_is_a_class_list() {
        let enc: CategoryEncoder =
            serde_json::from_str(r#"{"classes": ["HR", "Accounting"]}"#).unwrap();
        assert_eq!(enc.encode("Accounting"), Some(1));
        assert_eq!(enc.default_label(), "HR");

        let err = serde_json::from_str::<CategoryEncoder>(r#"{"classes": []}"#).unwrap_err();
        assert!(err.to_string().contains("no classes"));
    }
}
