use crate::core::{ConfigProvider, ConflictMatching};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{parse_utc_offset, validate_range, validate_url, Validate};
use chrono::FixedOffset;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_SLOT_MINUTES: i64 = 30;

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub availability: AvailabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    #[serde(default)]
    pub conflict_matching: ConflictMatching,
    /// `+HH:MM`; the system time zone when absent.
    pub utc_offset: Option<String>,
    pub default_slot_minutes: Option<i64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(minutes) = self.availability.default_slot_minutes {
            validate_range("availability.default_slot_minutes", minutes, 1, 24 * 60)?;
        }

        if let Some(offset) = &self.availability.utc_offset {
            parse_utc_offset("availability.utc_offset", offset)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.base_url
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn conflict_matching(&self) -> ConflictMatching {
        self.availability.conflict_matching
    }

    fn utc_offset(&self) -> Result<Option<FixedOffset>> {
        self.availability
            .utc_offset
            .as_deref()
            .map(|offset| parse_utc_offset("availability.utc_offset", offset))
            .transpose()
    }

    fn default_slot_minutes(&self) -> i64 {
        self.availability
            .default_slot_minutes
            .unwrap_or(DEFAULT_SLOT_MINUTES)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://booking.example.com/api"
timeout_seconds = 5

[availability]
conflict_matching = "same-date"
utc_offset = "+02:00"
default_slot_minutes = 45
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://booking.example.com/api");
        assert_eq!(config.request_timeout_seconds(), 5);
        assert_eq!(config.conflict_matching(), ConflictMatching::SameDate);
        assert_eq!(
            config.utc_offset().unwrap(),
            FixedOffset::east_opt(2 * 3600)
        );
        assert_eq!(config.default_slot_minutes(), 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_endpoint(), "http://localhost:3000");
        assert_eq!(config.request_timeout_seconds(), 10);
        assert_eq!(config.conflict_matching(), ConflictMatching::TimeOfDay);
        assert_eq!(config.utc_offset().unwrap(), None);
        assert_eq!(config.default_slot_minutes(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BARBER_BOOKING_TEST_API_URL", "https://test.api.com");

        let toml_content = r#"
[api]
base_url = "${BARBER_BOOKING_TEST_API_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://test.api.com");

        std::env::remove_var("BARBER_BOOKING_TEST_API_URL");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[api]
base_url = "${BARBER_BOOKING_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "${BARBER_BOOKING_TEST_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_timeout = TomlConfig::from_toml_str("[api]\ntimeout_seconds = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());

        let bad_step =
            TomlConfig::from_toml_str("[availability]\ndefault_slot_minutes = -30\n").unwrap();
        assert!(bad_step.validate().is_err());

        let bad_offset =
            TomlConfig::from_toml_str("[availability]\nutc_offset = \"CET\"\n").unwrap();
        assert!(bad_offset.validate().is_err());
        assert!(bad_offset.utc_offset().is_err());
    }

    #[test]
    fn test_unknown_conflict_matching_fails_to_parse() {
        let err = TomlConfig::from_toml_str("[availability]\nconflict_matching = \"fuzzy\"\n")
            .unwrap_err();
        assert!(matches!(err, BookingError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://127.0.0.1:4000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_endpoint(), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/barber-booking.toml").unwrap_err();
        assert!(matches!(err, BookingError::IoError(_)));
    }
}
