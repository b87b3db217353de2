// Logger configuration
use serde::{Deserialize, Serialize};

use error_common::{GrievanceError, Result};

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for terminals
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = GrievanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(GrievanceError::ConfigError(format!(
                "unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    pub format: LogFormat,
    /// Pass every formatted line through the PII redactor
    pub redaction_enabled: bool,
    /// Replace redacted values with a short correlation hash instead of a mask
    pub hash_for_correlation: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            redaction_enabled: true,
            hash_for_correlation: false,
        }
    }
}

impl LoggerConfig {
    /// Create a logger configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("GRIEVANCE_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(format) = std::env::var("GRIEVANCE_LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Ok(enabled) = std::env::var("GRIEVANCE_LOG_REDACTION") {
            config.redaction_enabled = parse_flag("GRIEVANCE_LOG_REDACTION", &enabled)?;
        }
        if let Ok(hash) = std::env::var("GRIEVANCE_LOG_HASH_PII") {
            config.hash_for_correlation = parse_flag("GRIEVANCE_LOG_HASH_PII", &hash)?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_level<L: Into<String>>(mut self, level: L) -> Self {
        self.log_level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    value.trim().parse::<bool>().map_err(|_| {
        GrievanceError::ConfigError(format!("{} must be 'true' or 'false', got '{}'", name, value))
    })
}
