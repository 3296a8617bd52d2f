//! # Error Handling Module
//!
//! Centralized error handling for the citation extractor: the alias
//! dictionary loader, the recognizer compiler, configuration, and the HTTP
//! layer all funnel into one error enum with category/recovery metadata for
//! structured logging.

use thiserror::Error;

/// Result type used throughout the application.
pub type Result<T> = std::result::Result<T, CitationError>;

/// Errors produced by the citation extractor and its surrounding shell.
#[derive(Debug, Error)]
pub enum CitationError {
    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// The alias dictionary is missing, unreadable, or not a well-formed
    /// `law_id -> [alias, ...]` mapping. Fatal at startup.
    #[error("failed to load alias dictionary from {path}: {details}")]
    AliasLoadFailure { path: String, details: String },

    /// A malformed alias produced an invalid compiled pattern. Fatal at
    /// startup.
    #[error("failed to build recognizer: {details}")]
    RecognizerBuildFailure { details: String },

    /// Configuration errors (missing file fields, invalid values).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// JSON (de)serialization errors.
    #[error("JSON error: {0}")]
    Json(serde_json::Error),

    /// TOML parsing errors.
    #[error("TOML error: {0}")]
    Toml(toml::de::Error),

    /// Validation errors for a single configuration field.
    #[error("validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// A malformed HTTP request body.
    #[error("invalid API request: {details}")]
    InvalidApiRequest { details: String },

    /// Internal errors that don't fit another category.
    #[error("internal error: {message}")]
    Internal { message: String },

    /// Generic error with a message, for call sites that don't need a
    /// dedicated variant.
    #[error("{message}")]
    Generic { message: String },
}

impl CitationError {
    /// Whether the error is recoverable (worth retrying the same operation).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CitationError::Io(_))
    }

    /// Error category, for metrics and structured logging.
    pub fn category(&self) -> &'static str {
        match self {
            CitationError::Io(_) => "io",
            CitationError::AliasLoadFailure { .. } => "alias_dict",
            CitationError::RecognizerBuildFailure { .. } => "recognizer",
            CitationError::Config { .. } | CitationError::ValidationFailed { .. } => {
                "configuration"
            }
            CitationError::Json(_) | CitationError::Toml(_) => "serialization",
            CitationError::InvalidApiRequest { .. } => "api",
            CitationError::Internal { .. } | CitationError::Generic { .. } => "generic",
        }
    }

    /// Suggested recovery action, if any.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            CitationError::AliasLoadFailure { .. } => {
                Some("check the alias dictionary path and JSON shape")
            }
            CitationError::Io(_) => Some("check file permissions and retry"),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CitationError {
    fn from(err: std::io::Error) -> Self {
        CitationError::Io(err)
    }
}

impl From<serde_json::Error> for CitationError {
    fn from(err: serde_json::Error) -> Self {
        CitationError::Json(err)
    }
}

impl From<toml::de::Error> for CitationError {
    fn from(err: toml::de::Error) -> Self {
        CitationError::Toml(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_known_variants() {
        assert_eq!(
            CitationError::Config {
                message: "x".into()
            }
            .category(),
            "configuration"
        );
        assert_eq!(
            CitationError::AliasLoadFailure {
                path: "x".into(),
                details: "y".into()
            }
            .category(),
            "alias_dict"
        );
    }

    #[test]
    fn recovery_suggestions_are_targeted() {
        let err = CitationError::AliasLoadFailure {
            path: "/nope.json".into(),
            details: "not found".into(),
        };
        assert!(err.recovery_suggestion().is_some());

        let err = CitationError::Generic {
            message: "whatever".into(),
        };
        assert!(err.recovery_suggestion().is_none());
    }
}
