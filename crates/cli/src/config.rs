//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TRACKLINE_UTC_OFFSET` - Offset for calendar arithmetic and display, e.g. `+05:30` (default: host local offset)
//! - `TRACKLINE_DUPLICATE_POLICY` - `first`, `latest` or `earliest` (default: `latest`)
//! - `TRACKLINE_LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `RUST_LOG` - Log filter (default: `trackline=info`)

use chrono::{FixedOffset, Local, Offset, Utc};
use thiserror::Error;
use trackline_core::timeline::DuplicatePolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid log format: {s}")),
        }
    }
}

/// Trackline CLI configuration.
#[derive(Debug, Clone)]
pub struct TracklineConfig {
    /// Offset used for delivery date arithmetic and timestamp display
    pub utc_offset: FixedOffset,
    /// How duplicate events for a step are resolved
    pub duplicate_policy: DuplicatePolicy,
    /// Log output format
    pub log_format: LogFormat,
}

impl TracklineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or_default =
            |key: &str, default: &str| get_optional(key).unwrap_or_else(|| default.to_string());

        let utc_offset = match get_optional("TRACKLINE_UTC_OFFSET") {
            Some(value) => parse_offset(&value)
                .map_err(|e| ConfigError::InvalidEnvVar("TRACKLINE_UTC_OFFSET".to_string(), e))?,
            None => Local::now().offset().fix(),
        };

        let duplicate_policy = get_or_default("TRACKLINE_DUPLICATE_POLICY", "latest")
            .parse::<DuplicatePolicy>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRACKLINE_DUPLICATE_POLICY".to_string(), e))?;

        let log_format = get_or_default("TRACKLINE_LOG_FORMAT", "text")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRACKLINE_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            utc_offset,
            duplicate_policy,
            log_format,
        })
    }
}

/// Parse a UTC offset such as `+05:30`, `-08:00`, `Z` or `UTC`.
///
/// # Errors
///
/// Returns a message describing the accepted forms.
pub fn parse_offset(value: &str) -> Result<FixedOffset, String> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }

    trimmed
        .parse::<FixedOffset>()
        .map_err(|_| format!("expected an offset like +05:30 or UTC, got {value:?}"))
}
