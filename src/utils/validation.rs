use crate::utils::error::{BookingError, Result};
use chrono::FixedOffset;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex =
        Regex::new(r"^(\+386\s?[1-7]\s?\d{3}\s?\d{2}\s?\d{2})$").unwrap();
    static ref UTC_OFFSET_RE: Regex = Regex::new(r"^([+-])(\d{2}):?(\d{2})$").unwrap();
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BookingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses `+HH:MM`, `-HH:MM` or `+HHMM` into a fixed offset east of UTC.
pub fn parse_utc_offset(field_name: &str, value: &str) -> Result<FixedOffset> {
    let invalid = |reason: &str| BookingError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let caps = UTC_OFFSET_RE
        .captures(value.trim())
        .ok_or_else(|| invalid("Expected an offset like +01:00 or -05:30"))?;

    let hours: i32 = caps[2].parse().map_err(|_| invalid("Invalid hours"))?;
    let minutes: i32 = caps[3].parse().map_err(|_| invalid("Invalid minutes"))?;
    if minutes >= 60 {
        return Err(invalid("Minutes must be below 60"));
    }

    let mut seconds = (hours * 60 + minutes) * 60;
    if &caps[1] == "-" {
        seconds = -seconds;
    }

    FixedOffset::east_opt(seconds).ok_or_else(|| invalid("Offset out of range"))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Slovenian numbers only: `+386` followed by an area digit 1-7.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
