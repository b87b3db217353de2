//! Request/response schemas for the Grievance Engine
//!
//! Citizens report civic issues (potholes, garbage dumps, broken
//! streetlights), an external classifier scores them and field workers
//! resolve them. This crate defines the records exchanged at the HTTP
//! boundary and validates untyped payloads into them:
//!
//! - **Users**: [`UserBase`], [`UserCreate`], [`User`]
//! - **Auth**: [`Token`], [`TokenData`]
//! - **Complaints**: [`ComplaintBase`], [`ComplaintCreate`], [`ComplaintAIResponse`]
//! - **Workers**: [`Worker`]
//!
//! Every record implements [`Schema`]: required fields must be present and
//! coercible, optional fields read as `None` when absent or null, unknown
//! keys are ignored and all offending fields are reported in one
//! [`ValidationError`](error_common::ValidationError). Output views can also
//! be built from persisted objects through the `*Attributes` traits.
//!
//! # Example
//!
//! ```rust
//! use grievance_schemas::{Schema, UserCreate};
//! use serde_json::json;
//!
//! let user = UserCreate::validate(&json!({
//!     "phone_number": "+1555",
//!     "name": "Alice",
//!     "password": "x"
//! })).unwrap();
//! assert_eq!(user.area, None);
//!
//! let err = UserCreate::validate(&json!({"name": "Alice"})).unwrap_err();
//! assert!(err.has_field("phone_number"));
//! ```

pub mod auth;
pub mod coerce;
pub mod complaints;
pub mod config;
pub mod kind;
pub mod schema;
pub mod stats;
pub mod users;
pub mod workers;

pub use auth::*;
pub use complaints::*;
pub use config::ValidationConfig;
pub use kind::SchemaKind;
pub use schema::{FieldReader, Schema};
pub use stats::{validate_listing, ComplaintStats};
pub use users::*;
pub use workers::*;
