use serde::{Deserialize, Serialize};
use std::path::Path;

use error_common::{GrievanceError, Result};

const ENV_PREFIX: &str = "GRIEVANCE_VALIDATION";

/// Knobs for field coercion and declared constraints.
///
/// The defaults impose no constraints and use lax coercion, so any complete
/// and well-typed payload constructs unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accept only values already of the declared JSON type (no string to
    /// number parsing, no integral floats for ints, no timestamp fallbacks).
    pub strict: bool,

    /// Upper bound on the character length of every string field
    pub max_str_length: Option<usize>,

    /// Whether `inf`/`nan` spelled in string input are acceptable floats
    pub allow_inf_nan: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_str_length: None,
            allow_inf_nan: true,
        }
    }
}

impl ValidationConfig {
    /// Strict coercion, otherwise default
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_str_length(mut self, max: usize) -> Self {
        self.max_str_length = Some(max);
        self
    }

    #[must_use]
    pub fn with_allow_inf_nan(mut self, allow: bool) -> Self {
        self.allow_inf_nan = allow;
        self
    }

    /// Create a validation configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(strict) = std::env::var(format!("{}_STRICT", ENV_PREFIX)) {
            config.strict = parse_env("STRICT", &strict)?;
        }
        if let Ok(max) = std::env::var(format!("{}_MAX_STR_LENGTH", ENV_PREFIX)) {
            config.max_str_length = Some(parse_env("MAX_STR_LENGTH", &max)?);
        }
        if let Ok(allow) = std::env::var(format!("{}_ALLOW_INF_NAN", ENV_PREFIX)) {
            config.allow_inf_nan = parse_env("ALLOW_INF_NAN", &allow)?;
        }

        Ok(config)
    }

    /// Load configuration from a TOML/YAML/JSON file, with the same
    /// `GRIEVANCE_VALIDATION_*` environment variables layered on top.
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| {
                GrievanceError::ConfigError(format!("failed to read {}: {}", path.display(), e))
            })?;

        settings.try_deserialize().map_err(|e| {
            GrievanceError::ConfigError(format!("invalid validation config in {}: {}", path.display(), e))
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        GrievanceError::ConfigError(format!(
            "{}_{} has an invalid value '{}'",
            ENV_PREFIX, key, value
        ))
    })
}
