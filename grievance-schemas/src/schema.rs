//! The [`Schema`] trait and the field reader every record is built through.

use serde_json::{Map, Value};

use error_common::{FieldError, ValidationError, ROOT_FIELD};

use crate::coerce::FieldType;
use crate::config::ValidationConfig;

/// Reads declared fields off a JSON object, collecting every failure
/// instead of stopping at the first one.
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    config: &'a ValidationConfig,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>, config: &'a ValidationConfig) -> Self {
        Self {
            fields,
            config,
            errors: Vec::new(),
        }
    }

    /// A field that must be present and non-null.
    pub fn required<T: FieldType>(&mut self, name: &str) -> Option<T> {
        match self.fields.get(name) {
            None => {
                self.errors.push(FieldError::missing(name));
                None
            }
            Some(Value::Null) => {
                self.errors.push(FieldError::type_mismatch(name, T::EXPECTED));
                None
            }
            Some(value) => self.coerce(name, value),
        }
    }

    /// A field that may be absent or null; both read as `None`.
    pub fn optional<T: FieldType>(&mut self, name: &str) -> Option<Option<T>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.coerce(name, value).map(Some),
        }
    }

    fn coerce<T: FieldType>(&mut self, name: &str, value: &Value) -> Option<T> {
        match T::coerce(value, self.config) {
            Ok(v) => Some(v),
            Err(reason) => {
                self.errors.push(FieldError::new(name, reason));
                None
            }
        }
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// A record kind that can be validated from an untyped key-value payload.
///
/// Implementors only describe how to read their fields; presence checks,
/// coercion, error collection and logging are shared.
pub trait Schema: Sized {
    /// Record kind name reported in validation errors
    const NAME: &'static str;

    /// Read every declared field. Returns `None` only when the reader has
    /// recorded at least one error.
    fn read(fields: &mut FieldReader<'_>) -> Option<Self>;

    /// Validate `payload` under the default configuration.
    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        Self::validate_with(payload, &ValidationConfig::default())
    }

    /// Validate `payload` under `config`. Unknown keys are ignored.
    fn validate_with(payload: &Value, config: &ValidationConfig) -> Result<Self, ValidationError> {
        let Some(fields) = payload.as_object() else {
            tracing::debug!(schema = Self::NAME, "payload is not an object");
            return Err(ValidationError::single(
                Self::NAME,
                FieldError::type_mismatch(ROOT_FIELD, "object"),
            ));
        };

        let mut reader = FieldReader::new(fields, config);
        let record = Self::read(&mut reader);
        let errors = reader.into_errors();

        match record {
            Some(record) if errors.is_empty() => Ok(record),
            _ => {
                let err = ValidationError::new(Self::NAME, errors);
                tracing::debug!(
                    schema = Self::NAME,
                    error_count = err.errors().len(),
                    fields = ?err.fields().collect::<Vec<_>>(),
                    "payload rejected"
                );
                Err(err)
            }
        }
    }

    /// Parse JSON text, then validate it.
    fn from_json(text: &str) -> Result<Self, ValidationError> {
        let payload: Value = serde_json::from_str(text).map_err(|e| {
            tracing::debug!(schema = Self::NAME, error = %e, "payload is not valid JSON");
            ValidationError::single(Self::NAME, FieldError::type_mismatch(ROOT_FIELD, "JSON document"))
        })?;
        Self::validate(&payload)
    }
}

/// Routes `Deserialize` through [`Schema::validate`] so frameworks that
/// deserialize request bodies get the same checks and error report.
/// Pair with `#[serde(try_from = "serde_json::Value")]` on the record.
macro_rules! impl_try_from_value {
    ($($record:ty),+ $(,)?) => {
        $(
            impl TryFrom<serde_json::Value> for $record {
                type Error = error_common::ValidationError;

                fn try_from(payload: serde_json::Value) -> Result<Self, Self::Error> {
                    <$record as $crate::schema::Schema>::validate(&payload)
                }
            }
        )+
    };
}

pub(crate) use impl_try_from_value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Probe {
        count: i64,
        label: Option<String>,
    }

    impl Schema for Probe {
        const NAME: &'static str = "Probe";

        fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
            let count = fields.required("count");
            let label = fields.optional("label");
            Some(Self {
                count: count?,
                label: label?,
            })
        }
    }

    #[test]
    fn test_collects_all_errors() {
        let err = Probe::validate(&json!({"label": 5})).unwrap_err();
        assert_eq!(err.schema(), "Probe");
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["count", "label"]);
    }

    #[test]
    fn test_null_required_is_type_mismatch() {
        let err = Probe::validate(&json!({"count": null})).unwrap_err();
        assert_eq!(
            err.reason_for("count"),
            Some(&error_common::FieldErrorReason::TypeMismatch { expected: "integer" })
        );
    }

    #[test]
    fn test_null_optional_is_absent() {
        let probe = Probe::validate(&json!({"count": 1, "label": null, "extra": []})).unwrap();
        assert_eq!(probe, Probe { count: 1, label: None });
    }

    #[test]
    fn test_non_object_payload() {
        let err = Probe::validate(&json!([1, 2])).unwrap_err();
        assert!(err.has_field(ROOT_FIELD));
        assert_eq!(err.errors()[0].code(), "VALIDATION_1001");
    }

    #[test]
    fn test_invalid_json_text() {
        let err = Probe::from_json("{count: 1").unwrap_err();
        assert!(err.has_field(ROOT_FIELD));
        assert!(Probe::from_json(r#"{"count": 3}"#).is_ok());
    }
}
