//! Complaint submission input and the AI-enriched complaint view.
//!
//! Classification fields (`issue_type`, the scores, `department_suggested`)
//! are produced by the external classifier; this layer only carries them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::schema::{impl_try_from_value, FieldReader, Schema};

/// Severity at or above which a complaint counts as critical
pub const CRITICAL_SEVERITY: f64 = 8.0;

/// Status a complaint carries once closed out by a field worker
pub const RESOLVED_STATUS: &str = "Resolved";

/// Fields shared by complaint input and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ComplaintBase {
    pub title: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Either uploaded by the API beforehand or supplied directly by the client
    pub image_url: String,
}

impl Schema for ComplaintBase {
    const NAME: &'static str = "ComplaintBase";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let title = fields.required("title");
        let description = fields.optional("description");
        let latitude = fields.optional("latitude");
        let longitude = fields.optional("longitude");
        let image_url = fields.required("image_url");
        Some(Self {
            title: title?,
            description: description?,
            latitude: latitude?,
            longitude: longitude?,
            image_url: image_url?,
        })
    }
}

/// Complaint submission payload; same fields as [`ComplaintBase`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ComplaintCreate(pub ComplaintBase);

// Serializes exactly as the wrapped base, no newtype layer on the wire.
impl Serialize for ComplaintCreate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl Schema for ComplaintCreate {
    const NAME: &'static str = "ComplaintCreate";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        ComplaintBase::read(fields).map(Self)
    }
}

impl From<ComplaintCreate> for ComplaintBase {
    fn from(create: ComplaintCreate) -> Self {
        create.0
    }
}

/// Stored complaint enriched with the classifier's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ComplaintAIResponse {
    #[serde(flatten)]
    pub base: ComplaintBase,
    pub id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub reporter_id: i64,
    pub issue_type: Option<String>,
    pub severity_score: Option<f64>,
    pub confidence_score: Option<f64>,
    pub department_suggested: Option<String>,
}

impl ComplaintAIResponse {
    /// Unscored complaints are never critical.
    pub fn is_critical(&self) -> bool {
        self.severity_score
            .is_some_and(|score| score >= CRITICAL_SEVERITY)
    }

    pub fn is_resolved(&self) -> bool {
        self.status == RESOLVED_STATUS
    }

    /// Build the view from any persisted complaint, whatever its concrete type.
    pub fn from_attributes<A: ComplaintAttributes + ?Sized>(source: &A) -> Self {
        Self {
            base: ComplaintBase {
                title: source.title().to_string(),
                description: source.description().map(str::to_string),
                latitude: source.latitude(),
                longitude: source.longitude(),
                image_url: source.image_url().to_string(),
            },
            id: source.id(),
            status: source.status().to_string(),
            created_at: source.created_at(),
            reporter_id: source.reporter_id(),
            issue_type: source.issue_type().map(str::to_string),
            severity_score: source.severity_score(),
            confidence_score: source.confidence_score(),
            department_suggested: source.department_suggested().map(str::to_string),
        }
    }
}

/// Accessors a persisted complaint must expose to be viewed as a
/// [`ComplaintAIResponse`].
pub trait ComplaintAttributes {
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
    fn image_url(&self) -> &str;
    fn id(&self) -> i64;
    fn status(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn reporter_id(&self) -> i64;
    fn issue_type(&self) -> Option<&str>;
    fn severity_score(&self) -> Option<f64>;
    fn confidence_score(&self) -> Option<f64>;
    fn department_suggested(&self) -> Option<&str>;
}

impl ComplaintAttributes for ComplaintAIResponse {
    fn title(&self) -> &str {
        &self.base.title
    }
    fn description(&self) -> Option<&str> {
        self.base.description.as_deref()
    }
    fn latitude(&self) -> Option<f64> {
        self.base.latitude
    }
    fn longitude(&self) -> Option<f64> {
        self.base.longitude
    }
    fn image_url(&self) -> &str {
        &self.base.image_url
    }
    fn id(&self) -> i64 {
        self.id
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn reporter_id(&self) -> i64 {
        self.reporter_id
    }
    fn issue_type(&self) -> Option<&str> {
        self.issue_type.as_deref()
    }
    fn severity_score(&self) -> Option<f64> {
        self.severity_score
    }
    fn confidence_score(&self) -> Option<f64> {
        self.confidence_score
    }
    fn department_suggested(&self) -> Option<&str> {
        self.department_suggested.as_deref()
    }
}

impl Schema for ComplaintAIResponse {
    const NAME: &'static str = "ComplaintAIResponse";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let base = ComplaintBase::read(fields);
        let id = fields.required("id");
        let status = fields.required("status");
        let created_at = fields.required("created_at");
        let reporter_id = fields.required("reporter_id");
        let issue_type = fields.optional("issue_type");
        let severity_score = fields.optional("severity_score");
        let confidence_score = fields.optional("confidence_score");
        let department_suggested = fields.optional("department_suggested");
        Some(Self {
            base: base?,
            id: id?,
            status: status?,
            created_at: created_at?,
            reporter_id: reporter_id?,
            issue_type: issue_type?,
            severity_score: severity_score?,
            confidence_score: confidence_score?,
            department_suggested: department_suggested?,
        })
    }
}

impl_try_from_value!(ComplaintBase, ComplaintCreate, ComplaintAIResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use error_common::FieldErrorReason;
    use serde_json::json;

    fn pothole() -> serde_json::Value {
        json!({
            "title": "Pothole",
            "description": "MG Road, near Metro Pillar 42",
            "latitude": 12.9756,
            "longitude": 77.6050,
            "image_url": "https://cdn.example.org/c/12.jpg",
            "id": 12,
            "status": "Pending Assignment",
            "created_at": "2024-03-01T10:15:00Z",
            "reporter_id": 3,
            "issue_type": "Pothole",
            "severity_score": 8.4,
            "confidence_score": 0.94,
            "department_suggested": "Roads & Bridges"
        })
    }

    #[test]
    fn test_complaint_create_minimal() {
        let create = ComplaintCreate::validate(&json!({
            "title": "Garbage Dump",
            "image_url": "https://cdn.example.org/c/45.jpg"
        }))
        .unwrap();
        assert_eq!(create.0.title, "Garbage Dump");
        assert_eq!(create.0.description, None);
        assert_eq!(create.0.latitude, None);
        assert_eq!(create.0.longitude, None);
    }

    #[test]
    fn test_latitude_not_a_number() {
        let err = ComplaintCreate::validate(&json!({
            "title": "Pothole",
            "latitude": "abc",
            "image_url": "https://cdn.example.org/c/12.jpg"
        }))
        .unwrap_err();
        assert_eq!(err.schema(), "ComplaintCreate");
        assert_eq!(
            err.reason_for("latitude"),
            Some(&FieldErrorReason::TypeMismatch { expected: "number" })
        );
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_ai_response_fields() {
        let complaint = ComplaintAIResponse::validate(&pothole()).unwrap();
        assert_eq!(complaint.id, 12);
        assert_eq!(complaint.base.latitude, Some(12.9756));
        assert_eq!(
            complaint.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap()
        );
        assert!(complaint.is_critical());
        assert!(!complaint.is_resolved());
    }

    #[test]
    fn test_ai_response_serializes_flat() {
        let complaint = ComplaintAIResponse::validate(&pothole()).unwrap();
        let value = serde_json::to_value(&complaint).unwrap();
        assert_eq!(value["title"], "Pothole");
        assert_eq!(value["severity_score"], 8.4);
        assert_eq!(value["created_at"], "2024-03-01T10:15:00Z");
        assert!(value.get("base").is_none());

        let back = ComplaintAIResponse::validate(&value).unwrap();
        assert_eq!(back, complaint);
    }

    #[test]
    fn test_ai_response_classifier_fields_optional() {
        let mut payload = pothole();
        let object = payload.as_object_mut().unwrap();
        for key in ["issue_type", "severity_score", "confidence_score", "department_suggested"] {
            object.remove(key);
        }
        let complaint = ComplaintAIResponse::validate(&payload).unwrap();
        assert_eq!(complaint.severity_score, None);
        assert!(!complaint.is_critical());
    }

    #[test]
    fn test_ai_response_from_attributes_roundtrip() {
        let complaint = ComplaintAIResponse::validate(&pothole()).unwrap();
        assert_eq!(ComplaintAIResponse::from_attributes(&complaint), complaint);
    }

    #[test]
    fn test_complaint_create_is_transparent() {
        let payload = json!({
            "title": "Streetlight out",
            "description": null,
            "latitude": null,
            "longitude": null,
            "image_url": "https://cdn.example.org/c/7.jpg"
        });
        let create = ComplaintCreate::validate(&payload).unwrap();
        assert_eq!(serde_json::to_value(&create).unwrap(), payload);
        let base: ComplaintBase = create.into();
        assert_eq!(base.title, "Streetlight out");
    }
}
