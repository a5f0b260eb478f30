use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchBreak {
    #[serde(deserialize_with = "de_hour")]
    pub start_hour: u32,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// 0 (Sunday) to 6 (Saturday).
    pub day: u32,
    #[serde(deserialize_with = "de_hour")]
    pub start_hour: u32,
    #[serde(deserialize_with = "de_hour")]
    pub end_hour: u32,
    #[serde(rename = "lunchTime", alias = "lunchBreak")]
    pub lunch_break: LunchBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub work_hours: Vec<WorkHours>,
}

impl Barber {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First entry for the given weekday (0 = Sunday).
    pub fn work_hours_for(&self, weekday: u32) -> Option<&WorkHours> {
        self.work_hours.iter().find(|wh| wh.day == weekday)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    /// Unix timestamp in seconds.
    pub start_date: i64,
    pub barber_id: String,
    pub service_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub start_date: i64,
    pub barber_id: String,
    pub service_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Minutes.
    pub duration: i64,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub barber_id: String,
    pub date: NaiveDate,
    pub service_duration_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub hour: u32,
    pub minute: u32,
}

impl Slot {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for Slot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BookingError::invalid_argument("time", format!("`{}` is not a H:MM time", s));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }
}

/// How an existing appointment is matched against a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ConflictMatching {
    /// Local hour and minute only; an appointment blocks that time on every date.
    #[default]
    TimeOfDay,
    /// Local hour, minute and calendar date.
    SameDate,
}

// The backend stores some hours as strings ("17"), so accept both.
fn de_hour<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hour {
        Number(u32),
        Text(String),
    }

    match Hour::deserialize(deserializer)? {
        Hour::Number(h) => Ok(h),
        Hour::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid hour `{}`", s))),
    }
}
