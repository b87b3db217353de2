//! Field-level validation errors raised at the request/response boundary.
//!
//! A [`ValidationError`] names the record kind that failed and carries one
//! [`FieldError`] per offending field, so the HTTP layer can hand the whole
//! list back to the caller in one response.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::codes::validation as codes;

/// Location used when the payload as a whole is unusable (not an object,
/// not JSON at all).
pub const ROOT_FIELD: &str = "__root__";

/// Why a single field was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorReason {
    /// A required field was absent from the payload.
    #[error("field required")]
    Missing,
    /// The value could not be coerced to the declared type.
    #[error("input should be a valid {expected}")]
    TypeMismatch { expected: &'static str },
    /// The value has the right type but breaks a declared constraint.
    #[error("{message}")]
    Constraint { message: String },
}

impl FieldErrorReason {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => codes::MISSING_REQUIRED_FIELD,
            Self::TypeMismatch { expected } if is_document_level(expected) => codes::INVALID_INPUT,
            Self::TypeMismatch { .. } => codes::INVALID_FORMAT,
            Self::Constraint { .. } => codes::CONSTRAINT_VIOLATION,
        }
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::Constraint { .. } => "constraint",
        }
    }
}

// Payload-shape failures (not an object, not JSON) rather than a bad field.
fn is_document_level(expected: &str) -> bool {
    matches!(expected, "object" | "array" | "JSON document")
}

/// A rejected field and the reason it was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct FieldError {
    pub field: String,
    pub reason: FieldErrorReason,
}

impl FieldError {
    pub fn new<F: Into<String>>(field: F, reason: FieldErrorReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }

    pub fn missing<F: Into<String>>(field: F) -> Self {
        Self::new(field, FieldErrorReason::Missing)
    }

    pub fn type_mismatch<F: Into<String>>(field: F, expected: &'static str) -> Self {
        Self::new(field, FieldErrorReason::TypeMismatch { expected })
    }

    pub fn constraint<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::new(
            field,
            FieldErrorReason::Constraint {
                message: message.into(),
            },
        )
    }

    pub fn code(&self) -> &'static str {
        self.reason.code()
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 4)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("type", self.reason.kind())?;
        state.serialize_field("message", &self.reason.to_string())?;
        state.end()
    }
}

/// Construction of a record failed on one or more fields.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[error("{}", render_summary(.schema, .errors))]
pub struct ValidationError {
    schema: String,
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(schema: S, errors: Vec<FieldError>) -> Self {
        Self {
            schema: schema.into(),
            errors,
        }
    }

    /// Error carrying exactly one field failure
    pub fn single<S: Into<String>>(schema: S, error: FieldError) -> Self {
        Self::new(schema, vec![error])
    }

    /// Name of the record kind that failed to construct
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of every offending field, in the order they were checked
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// Reason reported for `field`, if it failed
    pub fn reason_for(&self, field: &str) -> Option<&FieldErrorReason> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.reason)
    }

    /// Re-roots every field location under `prefix`, e.g. the position of
    /// the record inside a list payload.
    #[must_use]
    pub fn prefixed(mut self, prefix: &str) -> Self {
        for error in &mut self.errors {
            error.field = if error.field == ROOT_FIELD {
                prefix.to_string()
            } else {
                format!("{}.{}", prefix, error.field)
            };
        }
        self
    }
}

// "2 validation errors for UserCreate" followed by one indented line per field
fn render_summary(schema: &str, errors: &[FieldError]) -> String {
    let plural = if errors.len() == 1 { "" } else { "s" };
    let mut summary = format!("{} validation error{} for {}", errors.len(), plural, schema);
    for error in errors {
        summary.push_str("\n  ");
        summary.push_str(&error.to_string());
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_lists_every_field() {
        let err = ValidationError::new(
            "UserCreate",
            vec![
                FieldError::missing("phone_number"),
                FieldError::type_mismatch("name", "string"),
            ],
        );
        let rendered = err.to_string();
        assert!(rendered.starts_with("2 validation errors for UserCreate"));
        assert!(rendered.contains("phone_number: field required"));
        assert!(rendered.contains("name: input should be a valid string"));
    }

    #[test]
    fn test_single_error_summary_and_source() {
        let err = ValidationError::single("Worker", FieldError::constraint("name", "string too long"));
        assert_eq!(err.to_string(), "1 validation error for Worker\n  name: string too long");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_codes_per_reason() {
        assert_eq!(FieldError::missing("a").code(), "VALIDATION_1002");
        assert_eq!(FieldError::type_mismatch("a", "integer").code(), "VALIDATION_1003");
        assert_eq!(FieldError::type_mismatch(ROOT_FIELD, "object").code(), "VALIDATION_1001");
        assert_eq!(FieldError::constraint("a", "too long").code(), "VALIDATION_1004");
    }

    #[test]
    fn test_wire_shape() {
        let err = ValidationError::single("Token", FieldError::missing("token_type"));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "schema": "Token",
                "errors": [{
                    "field": "token_type",
                    "code": "VALIDATION_1002",
                    "type": "missing",
                    "message": "field required"
                }]
            })
        );
    }

    #[test]
    fn test_prefixed_rewrites_locations() {
        let err = ValidationError::new(
            "ComplaintAIResponse",
            vec![
                FieldError::type_mismatch("severity_score", "number"),
                FieldError::type_mismatch(ROOT_FIELD, "object"),
            ],
        )
        .prefixed("3");
        assert!(err.has_field("3.severity_score"));
        assert!(err.has_field("3"));
        assert_eq!(
            err.reason_for("3.severity_score"),
            Some(&FieldErrorReason::TypeMismatch { expected: "number" })
        );
    }
}
