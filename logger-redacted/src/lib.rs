//! Logging with automatic PII redaction for the Grievance Engine
//!
//! Complaint payloads carry citizens' phone numbers and registration
//! payloads carry plaintext passwords. Every log line emitted through the
//! subscriber installed by [`init`] is passed through a [`PiiRedactor`]
//! before it is written, so neither can reach the log sink even when a
//! handler logs a raw payload by mistake.
//!
//! # Detected Data Types
//!
//! - **Phone Numbers**: `+91 9876543210` → `+**********10`
//! - **Passwords / access tokens** in `key=value` or JSON form → `[REDACTED]`
//! - **Bearer credentials and JWTs** → `Bearer [REDACTED]`
//! - **Email Addresses**: `user@example.com` → `u***@e***`
//! - **Custom Patterns**: configurable regex replacements
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{LoggerConfig, LogFormat};
//!
//! let config = LoggerConfig::default().with_format(LogFormat::Json);
//! logger_redacted::init(&config).ok();
//! tracing::info!("complaint filed by +91 9876543210");
//! // Output: "complaint filed by +**********10"
//! ```

pub mod config;
pub mod redactor;
pub mod writer;

pub use config::*;
pub use redactor::*;
pub use writer::*;

use error_common::{GrievanceError, Result};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install the global tracing subscriber. Logs go to stderr so that
/// command output on stdout stays machine readable.
pub fn init(config: &LoggerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| GrievanceError::LoggingError(format!("invalid log filter: {}", e)))?;

    let redactor = PiiRedactor::new(RedactionConfig {
        redact_secrets: config.redaction_enabled,
        redact_phones: config.redaction_enabled,
        redact_emails: config.redaction_enabled,
        hash_for_correlation: config.hash_for_correlation,
        ..Default::default()
    });
    let writer = RedactingMakeWriter::new(std::io::stderr, redactor);

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer)
                    .json(),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| GrievanceError::LoggingError(format!("subscriber already installed: {}", e)))
}
