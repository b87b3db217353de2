/// From-attributes construction against persistence-style row types that
/// share nothing with the view records except their accessor traits.
use chrono::{DateTime, TimeZone, Utc};
use grievance_schemas::{
    ComplaintAIResponse, ComplaintAttributes, ComplaintStats, Schema, User, UserAttributes,
};
use serde_json::json;

struct UserRow {
    id: i64,
    phone_number: &'static str,
    name: Option<&'static str>,
    area: Option<&'static str>,
    is_active: bool,
}

impl UserAttributes for UserRow {
    fn id(&self) -> i64 {
        self.id
    }
    fn phone_number(&self) -> &str {
        self.phone_number
    }
    fn name(&self) -> Option<&str> {
        self.name
    }
    fn area(&self) -> Option<&str> {
        self.area
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
}

struct ComplaintRow {
    id: i64,
    title: String,
    image_url: String,
    status: String,
    created_at: DateTime<Utc>,
    reporter_id: i64,
    severity_score: Option<f64>,
}

impl ComplaintAttributes for ComplaintRow {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        None
    }
    fn latitude(&self) -> Option<f64> {
        None
    }
    fn longitude(&self) -> Option<f64> {
        None
    }
    fn image_url(&self) -> &str {
        &self.image_url
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
        None
    }
    fn severity_score(&self) -> Option<f64> {
        self.severity_score
    }
    fn confidence_score(&self) -> Option<f64> {
        None
    }
    fn department_suggested(&self) -> Option<&str> {
        None
    }
}

#[test]
fn test_user_from_row_matches_payload_validation() {
    let row = UserRow {
        id: 7,
        phone_number: "+1555",
        name: Some("Alice"),
        area: None,
        is_active: true,
    };
    let from_row = User::from_attributes(&row);
    let from_payload = User::validate(&json!({
        "id": 7,
        "phone_number": "+1555",
        "name": "Alice",
        "area": null,
        "is_active": true
    }))
    .unwrap();
    assert_eq!(from_row, from_payload);
}

#[test]
fn test_user_from_trait_object() {
    let row = UserRow {
        id: 9,
        phone_number: "+919876543210",
        name: None,
        area: Some("Sector 14"),
        is_active: false,
    };
    let source: &dyn UserAttributes = &row;
    let user = User::from_attributes(source);
    assert_eq!(user.area.as_deref(), Some("Sector 14"));
    assert!(!user.is_active);
}

#[test]
fn test_complaint_rows_feed_dashboard_stats() {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let rows = vec![
        ComplaintRow {
            id: 1,
            title: "Pothole".to_string(),
            image_url: "https://cdn.example.org/1.jpg".to_string(),
            status: "Resolved".to_string(),
            created_at,
            reporter_id: 4,
            severity_score: Some(8.4),
        },
        ComplaintRow {
            id: 2,
            title: "Garbage Dump".to_string(),
            image_url: "https://cdn.example.org/2.jpg".to_string(),
            status: "In Progress".to_string(),
            created_at,
            reporter_id: 5,
            severity_score: Some(9.1),
        },
    ];
    let views: Vec<ComplaintAIResponse> = rows.iter().map(ComplaintAIResponse::from_attributes).collect();
    assert_eq!(views[0].base.title, "Pothole");
    assert_eq!(views[1].created_at, created_at);

    let stats = ComplaintStats::from_complaints(&views);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.critical, 2);
    assert_eq!(stats.resolution_rate, 50);
}
