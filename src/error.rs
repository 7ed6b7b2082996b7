use std::path::Path;

/// Broad classification of an [`AppError`].
///
/// The TUI uses this to decide which failures are shown inline (`Value`) and
/// which abort the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An artifact file does not exist.
    NotFound,
    /// An artifact file exists but could not be read or is structurally invalid.
    Artifact,
    /// A model could not produce a prediction for the given features.
    Value,
    /// Bad command-line input.
    Usage,
    /// Terminal or other I/O failure.
    Runtime,
}

impl ErrorKind {
    fn default_exit_code(self) -> u8 {
        match self {
            ErrorKind::Usage => 2,
            ErrorKind::NotFound | ErrorKind::Artifact => 3,
            ErrorKind::Value | ErrorKind::Runtime => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.default_exit_code(),
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, message)
    }

    pub fn file_not_found(path: &Path) -> Self {
        Self::new(ErrorKind::NotFound, format!("File not found: {}", path.display()))
    }

    pub fn artifact(path: &Path, cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::Artifact,
            format!("An error occurred while loading {}: {cause}", path.display()),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::usage("x").exit_code(), 2);
        assert_eq!(AppError::file_not_found(Path::new("a.json")).exit_code(), 3);
        assert_eq!(AppError::value("x").exit_code(), 4);
    }

    #[test]
    fn file_not_found_names_the_path() {
        let err = AppError::file_not_found(Path::new("models/level_encoder.json"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "File not found: models/level_encoder.json");
    }
}
