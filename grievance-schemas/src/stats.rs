//! Dashboard summary over a complaint listing.

use serde::Serialize;
use serde_json::Value;

use error_common::{FieldError, ValidationError, ROOT_FIELD};

use crate::complaints::ComplaintAIResponse;
use crate::config::ValidationConfig;
use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStats {
    pub total: usize,
    /// Complaints whose severity score is at least 8
    pub critical: usize,
    pub resolved: usize,
    /// Percentage of resolved complaints, rounded half up; 0 for no complaints
    ///
    /// Computed in exact integer arithmetic, so 29/200 gives 15 where the
    /// dashboard's floating-point `Math.round` gives 14.
    pub resolution_rate: usize,
}

impl ComplaintStats {
    pub fn from_complaints<'a, I>(complaints: I) -> Self
    where
        I: IntoIterator<Item = &'a ComplaintAIResponse>,
    {
        let (total, critical, resolved) =
            complaints
                .into_iter()
                .fold((0_usize, 0_usize, 0_usize), |(total, critical, resolved), c| {
                    (
                        total + 1,
                        critical + usize::from(c.is_critical()),
                        resolved + usize::from(c.is_resolved()),
                    )
                });

        let resolution_rate = if total == 0 {
            0
        } else {
            (resolved * 200 + total) / (2 * total)
        };

        Self {
            total,
            critical,
            resolved,
            resolution_rate,
        }
    }
}

/// Validate a JSON array of complaint views. Every element is checked and
/// failures are reported together, located by element index (`"3.title"`).
pub fn validate_listing(
    payload: &Value,
    config: &ValidationConfig,
) -> Result<Vec<ComplaintAIResponse>, ValidationError> {
    let Some(items) = payload.as_array() else {
        return Err(ValidationError::single(
            ComplaintAIResponse::NAME,
            FieldError::type_mismatch(ROOT_FIELD, "array"),
        ));
    };

    let mut complaints = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match ComplaintAIResponse::validate_with(item, config) {
            Ok(complaint) => complaints.push(complaint),
            Err(err) => errors.extend(err.prefixed(&index.to_string()).errors().iter().cloned()),
        }
    }

    if errors.is_empty() {
        Ok(complaints)
    } else {
        Err(ValidationError::new(ComplaintAIResponse::NAME, errors))
    }
}
