//! Field worker view.

use serde::{Deserialize, Serialize};

use crate::schema::{impl_try_from_value, FieldReader, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub status: String,
    pub phone: String,
    pub location: String,
    pub rating: f64,
    pub active_tasks: i64,
    pub completed_tasks: i64,
}

/// Accessors a persisted worker must expose to be viewed as a [`Worker`].
pub trait WorkerAttributes {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn department(&self) -> &str;
    fn status(&self) -> &str;
    fn phone(&self) -> &str;
    fn location(&self) -> &str;
    fn rating(&self) -> f64;
    fn active_tasks(&self) -> i64;
    fn completed_tasks(&self) -> i64;
}

impl Worker {
    pub fn from_attributes<A: WorkerAttributes + ?Sized>(source: &A) -> Self {
        Self {
            id: source.id(),
            name: source.name().to_string(),
            department: source.department().to_string(),
            status: source.status().to_string(),
            phone: source.phone().to_string(),
            location: source.location().to_string(),
            rating: source.rating(),
            active_tasks: source.active_tasks(),
            completed_tasks: source.completed_tasks(),
        }
    }
}

impl Schema for Worker {
    const NAME: &'static str = "Worker";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let id = fields.required("id");
        let name = fields.required("name");
        let department = fields.required("department");
        let status = fields.required("status");
        let phone = fields.required("phone");
        let location = fields.required("location");
        let rating = fields.required("rating");
        let active_tasks = fields.required("active_tasks");
        let completed_tasks = fields.required("completed_tasks");
        Some(Self {
            id: id?,
            name: name?,
            department: department?,
            status: status?,
            phone: phone?,
            location: location?,
            rating: rating?,
            active_tasks: active_tasks?,
            completed_tasks: completed_tasks?,
        })
    }
}

impl_try_from_value!(Worker);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use error_common::FieldErrorReason;
    use serde_json::json;

    struct StaffRecord {
        staff_id: u32,
        full_name: String,
        dept: String,
        on_leave: bool,
        mobile: String,
        beat: Option<String>,
        avg_rating: f32,
        open: Vec<u32>,
        closed: u32,
    }

    // Adapter for a persistence type whose names and types differ.
    impl WorkerAttributes for StaffRecord {
        fn id(&self) -> i64 {
            i64::from(self.staff_id)
        }
        fn name(&self) -> &str {
            &self.full_name
        }
        fn department(&self) -> &str {
            &self.dept
        }
        fn status(&self) -> &str {
            if self.on_leave {
                "On Leave"
            } else {
                "Active"
            }
        }
        fn phone(&self) -> &str {
            &self.mobile
        }
        fn location(&self) -> &str {
            self.beat.as_deref().unwrap_or("N/A")
        }
        fn rating(&self) -> f64 {
            f64::from(self.avg_rating)
        }
        fn active_tasks(&self) -> i64 {
            i64::try_from(self.open.len()).unwrap_or(i64::MAX)
        }
        fn completed_tasks(&self) -> i64 {
            i64::from(self.closed)
        }
    }

    #[test]
    fn test_worker_validates() {
        let worker = Worker::validate(&json!({
            "id": 1,
            "name": "Rajinder Kumar",
            "department": "Roads & Bridges",
            "status": "Active",
            "phone": "+91 9876543100",
            "location": "Sector 14",
            "rating": 4.8,
            "active_tasks": 3,
            "completed_tasks": 45
        }))
        .unwrap();
        assert_eq!(worker.name, "Rajinder Kumar");
        assert_eq!(worker.rating, 4.8);
        assert_eq!(worker.active_tasks, 3);
    }

    #[test]
    fn test_worker_every_field_required() {
        let err = Worker::validate(&json!({"id": 1})).unwrap_err();
        assert_eq!(err.errors().len(), 8);
        assert!(!err.has_field("id"));
        assert!(err.has_field("completed_tasks"));
    }

    #[test]
    fn test_worker_rejects_fractional_task_count() {
        let err = Worker::validate(&json!({
            "id": 2,
            "name": "Suresh Patil",
            "department": "Waste Mgmt",
            "status": "On Leave",
            "phone": "+91 9876543101",
            "location": "N/A",
            "rating": "4.9",
            "active_tasks": 0.5,
            "completed_tasks": "82"
        }))
        .unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["active_tasks"]);
    }

    fn on_leave_payload() -> serde_json::Value {
        json!({
            "id": 2,
            "name": "Suresh Patil",
            "department": "Waste Mgmt",
            "status": "On Leave",
            "phone": "+91 9876543101",
            "location": "N/A",
            "rating": "nan",
            "active_tasks": 0,
            "completed_tasks": "82"
        })
    }

    #[test]
    fn test_worker_max_str_length_constraint() {
        let config = ValidationConfig::default().with_max_str_length(3);
        let err = Worker::validate_with(&on_leave_payload(), &config).unwrap_err();
        assert!(matches!(
            err.reason_for("name"),
            Some(FieldErrorReason::Constraint { .. })
        ));
        assert_eq!(err.errors()[0].code(), "VALIDATION_1004");
        assert!(err.has_field("department"));
        assert!(!err.has_field("location"));
    }

    #[test]
    fn test_worker_rejects_nan_rating_when_configured() {
        assert!(Worker::validate(&on_leave_payload()).unwrap().rating.is_nan());

        let config = ValidationConfig::default().with_allow_inf_nan(false);
        let err = Worker::validate_with(&on_leave_payload(), &config).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["rating"]);
        assert!(matches!(
            err.reason_for("rating"),
            Some(FieldErrorReason::Constraint { .. })
        ));
    }

    #[test]
    fn test_worker_strict_mode_rejects_strings() {
        let err = Worker::validate_with(&on_leave_payload(), &ValidationConfig::strict()).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["rating", "completed_tasks"]);
        assert_eq!(
            err.reason_for("completed_tasks"),
            Some(&FieldErrorReason::TypeMismatch { expected: "integer" })
        );
    }

    #[test]
    fn test_worker_from_adapter() {
        let record = StaffRecord {
            staff_id: 3,
            full_name: "Amit Sharma".to_string(),
            dept: "Water Supply".to_string(),
            on_leave: false,
            mobile: "+91 9876543102".to_string(),
            beat: None,
            avg_rating: 4.5,
            open: vec![17],
            closed: 34,
        };
        let worker = Worker::from_attributes(&record);
        assert_eq!(worker.id, 3);
        assert_eq!(worker.status, "Active");
        assert_eq!(worker.location, "N/A");
        assert_eq!(worker.rating, 4.5);
        assert_eq!(worker.active_tasks, 1);
        assert_eq!(worker.completed_tasks, 34);
    }
}
