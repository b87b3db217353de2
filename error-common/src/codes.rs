// Error codes implementation
// This module contains standardized error codes for the Grievance Engine

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
    pub const CONSTRAINT_VIOLATION: &str = "VALIDATION_1004";
}
