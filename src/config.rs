//! Runtime configuration resolved from flags and the environment.
//!
//! `.env` is loaded once (if present) so the same variables work in a shell
//! profile or next to the artifacts.

use std::path::{Path, PathBuf};

pub const ARTIFACTS_DIR_VAR: &str = "SALARY_ARTIFACTS_DIR";
pub const LOG_FILTER_VAR: &str = "SALARY_LOG";
pub const LOG_FILE_VAR: &str = "SALARY_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub artifacts_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Flag > environment > current directory.
    pub fn resolve(artifacts_flag: Option<&Path>) -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(artifacts_flag, |key| std::env::var(key).ok())
    }

    fn from_lookup(artifacts_flag: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let artifacts_dir = artifacts_flag
            .map(Path::to_path_buf)
            .or_else(|| non_empty(lookup(ARTIFACTS_DIR_VAR)).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let log_file = non_empty(lookup(LOG_FILE_VAR)).map(PathBuf::from);
        Self {
            artifacts_dir,
            log_file,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
