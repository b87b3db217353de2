//! Per-type coercion of raw JSON values into declared field types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use error_common::FieldErrorReason;

use crate::config::ValidationConfig;

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A type a record field can be declared as.
///
/// Lax mode accepts the same inputs as the web API's original validation
/// library (numeric strings, integral floats for integers, `true`/`false`
/// as 1/0 for numbers); strict mode accepts only the native JSON type.
pub trait FieldType: Sized {
    /// Type name reported on mismatch ("input should be a valid ...")
    const EXPECTED: &'static str;

    fn coerce(value: &Value, config: &ValidationConfig) -> Result<Self, FieldErrorReason>;
}

fn mismatch<T: FieldType>() -> FieldErrorReason {
    FieldErrorReason::TypeMismatch {
        expected: T::EXPECTED,
    }
}

impl FieldType for String {
    const EXPECTED: &'static str = "string";

    fn coerce(value: &Value, config: &ValidationConfig) -> Result<Self, FieldErrorReason> {
        let Value::String(s) = value else {
            return Err(mismatch::<Self>());
        };
        if let Some(max) = config.max_str_length {
            if s.chars().count() > max {
                return Err(FieldErrorReason::Constraint {
                    message: format!("string should have at most {} characters", max),
                });
            }
        }
        Ok(s.clone())
    }
}

impl FieldType for i64 {
    const EXPECTED: &'static str = "integer";

    fn coerce(value: &Value, config: &ValidationConfig) -> Result<Self, FieldErrorReason> {
        if let Some(n) = value.as_i64() {
            return Ok(n);
        }
        if config.strict {
            return Err(mismatch::<Self>());
        }
        match value {
            Value::Number(n) => n.as_f64().and_then(integral).ok_or_else(mismatch::<Self>),
            Value::String(s) => s.trim().parse().map_err(|_| mismatch::<Self>()),
            Value::Bool(b) => Ok(i64::from(*b)),
            _ => Err(mismatch::<Self>()),
        }
    }
}

// 3.0 -> 3, but 3.5 and out-of-range values are rejected.
#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if f.fract() == 0.0 && f >= -LIMIT && f < LIMIT {
        Some(f as i64)
    } else {
        None
    }
}

impl FieldType for f64 {
    const EXPECTED: &'static str = "number";

    fn coerce(value: &Value, config: &ValidationConfig) -> Result<Self, FieldErrorReason> {
        let parsed = match value {
            Value::Number(n) => n.as_f64().ok_or_else(mismatch::<Self>)?,
            Value::String(s) if !config.strict => {
                s.trim().parse::<f64>().map_err(|_| mismatch::<Self>())?
            }
            Value::Bool(b) if !config.strict => f64::from(u8::from(*b)),
            _ => return Err(mismatch::<Self>()),
        };
        if !config.allow_inf_nan && !parsed.is_finite() {
            return Err(FieldErrorReason::Constraint {
                message: "input should be a finite number".to_string(),
            });
        }
        Ok(parsed)
    }
}

impl FieldType for bool {
    const EXPECTED: &'static str = "boolean";

    fn coerce(value: &Value, config: &ValidationConfig) -> Result<Self, FieldErrorReason> {
        if let Value::Bool(b) = value {
            return Ok(*b);
        }
        if config.strict {
            return Err(mismatch::<Self>());
        }
        match value {
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
                "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
                _ => Err(mismatch::<Self>()),
            },
            Value::Number(n) => match n.as_i64() {
                Some(1) => Ok(true),
                Some(0) => Ok(false),
                _ => Err(mismatch::<Self>()),
            },
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl FieldType for DateTime<Utc> {
    const EXPECTED: &'static str = "datetime";

    fn coerce(value: &Value, config: &ValidationConfig) -> Result<Self, FieldErrorReason> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Ok(dt.with_timezone(&Utc));
                }
                if config.strict {
                    return Err(mismatch::<Self>());
                }
                NAIVE_TIMESTAMP_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|naive| naive.and_utc())
                    .ok_or_else(mismatch::<Self>)
            }
            Value::Number(n) if !config.strict => n
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .ok_or_else(mismatch::<Self>),
            _ => Err(mismatch::<Self>()),
        }
    }
}
