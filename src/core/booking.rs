use crate::domain::model::{NewAppointment, Slot};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{is_valid_email, is_valid_phone};
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;
use std::fmt;

/// Everything the customer filled in, captured at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub barber_id: String,
    pub service_id: String,
    pub date: Option<NaiveDate>,
    pub time: Option<Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Barber,
    Service,
    Date,
    Time,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Barber => "barber",
            Self::Service => "service",
            Self::Date => "date",
            Self::Time => "time",
        };
        f.write_str(name)
    }
}

/// Field errors, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl BookingForm {
    /// Checks every field and reports all failures together.
    pub fn validate(&self, today: NaiveDate) -> std::result::Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            errors.insert(FormField::Name, "Please enter your full name");
        }

        if !is_valid_email(&self.email) {
            errors.insert(FormField::Email, "Please enter a valid email");
        }

        if !is_valid_phone(&self.phone) {
            errors.insert(FormField::Phone, "Please enter a valid phone number");
        }

        if self.barber_id.trim().is_empty() {
            errors.insert(FormField::Barber, "Please select a barber");
        }

        if self.service_id.trim().is_empty() {
            errors.insert(FormField::Service, "Please select a service");
        }

        match self.date {
            None => errors.insert(FormField::Date, "Please select a date"),
            Some(date) if date < today => {
                errors.insert(FormField::Date, "Please select a date that is not in the past")
            }
            Some(_) => {}
        }

        if self.time.is_none() {
            errors.insert(FormField::Time, "Please select a time");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds the request body, reading date and time as local to `tz`.
    pub fn to_new_appointment<Tz: TimeZone>(&self, tz: &Tz) -> Result<NewAppointment> {
        let date = self
            .date
            .ok_or_else(|| BookingError::invalid_argument("date", "no date selected"))?;
        let time = self
            .time
            .ok_or_else(|| BookingError::invalid_argument("time", "no time selected"))?;

        let naive = date.and_hms_opt(time.hour, time.minute, 0).ok_or_else(|| {
            BookingError::invalid_argument("time", format!("{} is not a valid time", time))
        })?;
        let start = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
            BookingError::invalid_argument(
                "time",
                format!("{} {} does not exist in the configured time zone", date, time),
            )
        })?;

        Ok(NewAppointment {
            start_date: start.timestamp(),
            barber_id: self.barber_id.clone(),
            service_id: self.service_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid_form() -> BookingForm {
        BookingForm {
            first_name: "Ana".to_string(),
            last_name: "Novak".to_string(),
            email: "ana.novak@example.si".to_string(),
            phone: "+386 1 234 56 78".to_string(),
            barber_id: "b1".to_string(),
            service_id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3),
            time: Some(Slot::new(10, 30)),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate(today()).is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = BookingForm::default().validate(today()).unwrap_err();

        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(FormField::Name), Some("Please enter your full name"));
        assert_eq!(errors.get(FormField::Email), Some("Please enter a valid email"));
        assert_eq!(
            errors.get(FormField::Phone),
            Some("Please enter a valid phone number")
        );
        assert_eq!(errors.get(FormField::Barber), Some("Please select a barber"));
        assert_eq!(errors.get(FormField::Service), Some("Please select a service"));
        assert_eq!(errors.get(FormField::Date), Some("Please select a date"));
        assert_eq!(errors.get(FormField::Time), Some("Please select a time"));
    }

    #[test]
    fn test_missing_last_name_and_bad_phone() {
        let form = BookingForm {
            last_name: "  ".to_string(),
            phone: "041 234 567".to_string(),
            ..valid_form()
        };

        let errors = form.validate(today()).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.get(FormField::Name).is_some());
        assert!(errors.get(FormField::Phone).is_some());
        assert_eq!(
            errors.to_string(),
            "name: Please enter your full name; phone: Please enter a valid phone number"
        );
    }

    #[test]
    fn test_past_date_is_rejected() {
        let form = BookingForm {
            date: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..valid_form()
        };

        let errors = form.validate(today()).unwrap_err();
        assert_eq!(
            errors.get(FormField::Date),
            Some("Please select a date that is not in the past")
        );

        let same_day = BookingForm {
            date: Some(today()),
            ..valid_form()
        };
        assert!(same_day.validate(today()).is_ok());
    }

    #[test]
    fn test_new_appointment_uses_epoch_seconds() {
        let appointment = valid_form().to_new_appointment(&Utc).unwrap();

        assert_eq!(
            appointment.start_date,
            Utc.with_ymd_and_hms(2024, 6, 3, 10, 30, 0).unwrap().timestamp()
        );
        assert_eq!(appointment.barber_id, "b1");
        assert_eq!(appointment.service_id, "s1");
    }

    #[test]
    fn test_new_appointment_respects_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let appointment = valid_form().to_new_appointment(&plus_two).unwrap();

        assert_eq!(
            appointment.start_date,
            Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_new_appointment_requires_date_and_time() {
        let form = BookingForm {
            time: None,
            ..valid_form()
        };
        assert!(matches!(
            form.to_new_appointment(&Utc),
            Err(BookingError::InvalidArgument { .. })
        ));
    }
}
