//! Operations CLI for the Grievance Engine
//!
//! Lets operators and integrators check payloads against the schema layer
//! without running the API:
//!
//! ```bash
//! # Validate a registration body
//! echo '{"phone_number": "+1555", "name": "Alice", "password": "x"}' \
//!     | grievance validate --schema user-create
//!
//! # Strict coercion, bounded strings
//! grievance validate --schema complaint-create --strict --max-str-length 500 body.json
//!
//! # Dashboard numbers for a complaint export
//! grievance stats complaints.json
//!
//! # Known record kinds
//! grievance schemas
//! ```
//!
//! Normalized records and error reports go to stdout as JSON; logs go to
//! stderr through the redacting logger.

pub mod cli;
pub mod commands;

pub use cli::*;
pub use commands::*;
