//! Common error handling utilities for the Grievance Engine
//!
//! Standardized error types and error codes shared by the schema layer,
//! the logger and the operator CLI.
//!
//! # Error Categories
//!
//! - **ValidationError**: a payload could not be turned into a typed record;
//!   carries one entry per offending field (missing, type mismatch,
//!   constraint violation)
//! - **GrievanceError**: umbrella enum for configuration, logging, I/O and
//!   JSON failures around the schema layer
//!
//! # Example
//!
//! ```rust
//! use error_common::{FieldError, ValidationError};
//!
//! let err = ValidationError::single("UserBase", FieldError::missing("phone_number"));
//! assert!(err.has_field("phone_number"));
//! assert_eq!(err.errors()[0].code(), error_common::codes::validation::MISSING_REQUIRED_FIELD);
//! ```

pub mod codes;
pub mod types;
pub mod validation;

pub use types::*;
pub use validation::*;
