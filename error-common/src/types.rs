use thiserror::Error;

use crate::validation::ValidationError;

/// Umbrella error for the Grievance Engine crates
#[derive(Error, Debug)]
pub enum GrievanceError {
    /// A payload failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Logging subsystem errors
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON outside of schema validation
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GrievanceError {
    /// Validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for Grievance Engine operations
pub type Result<T> = std::result::Result<T, GrievanceError>;

/// Logs an error with the context it surfaced in
pub fn log_error(context: &str, error: &GrievanceError) {
    match error {
        GrievanceError::Validation(err) => tracing::warn!(
            context = context,
            schema = err.schema(),
            error_count = err.errors().len(),
            "Validation failed"
        ),
        other => tracing::error!(
            context = context,
            error = %other,
            "Grievance engine error occurred"
        ),
    }
}
