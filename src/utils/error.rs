use crate::core::booking::FormErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in `{field}`: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Booking form is invalid: {0}")]
    FormValidation(FormErrors),

    #[error("Unknown barber: {id}")]
    UnknownBarber { id: String },

    #[error("Unknown service: {id}")]
    UnknownService { id: String },

    #[error("Time {time} on {date} is not available")]
    SlotUnavailable { date: String, time: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. }
            | Self::FormValidation(_)
            | Self::UnknownBarber { .. }
            | Self::UnknownService { .. }
            | Self::SlotUnavailable { .. } => ErrorCategory::Input,
            Self::ApiError(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidArgument { name, .. } => format!("Check the value passed for `{}`", name),
            Self::ApiError(_) => "Check that the booking API is running and reachable".to_string(),
            Self::HttpStatus { status, .. } if *status >= 500 => {
                "The booking API had a problem, try again in a moment".to_string()
            }
            Self::HttpStatus { .. } => "Check the API URL and the request data".to_string(),
            Self::SerializationError(_) => {
                "The API response did not have the expected shape".to_string()
            }
            Self::IoError(_) => "Check file paths and permissions".to_string(),
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags".to_string()
            }
            Self::FormValidation(_) => "Correct the listed fields and submit again".to_string(),
            Self::UnknownBarber { .. } => {
                "Run `barber-booking barbers` to see available barbers".to_string()
            }
            Self::UnknownService { .. } => {
                "Run `barber-booking services` to see available services".to_string()
            }
            Self::SlotUnavailable { .. } => {
                "Run `barber-booking slots` to pick a free time".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::HttpStatus { .. } => {
                "Failed to reach the booking service. Please try again.".to_string()
            }
            Self::FormValidation(errors) => {
                let lines: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("  - {}: {}", field, message))
                    .collect();
                format!("Please fix the form:\n{}", lines.join("\n"))
            }
            Self::SlotUnavailable { date, time } => {
                format!("Sorry, {} on {} has just been taken.", time, date)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
