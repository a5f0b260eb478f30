use crate::core::booking::BookingForm;
use crate::core::Slot;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List barbers and their weekly hours
    Barbers,
    /// List services with duration and price
    Services,
    /// Show free time slots for a barber on a date
    Slots(SlotsArgs),
    /// Validate the booking form and submit the appointment
    Book(BookArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SlotsArgs {
    #[arg(long)]
    pub barber: String,

    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,

    /// Step through the day by this service's duration
    #[arg(long, conflicts_with = "duration")]
    pub service: Option<String>,

    /// Step in minutes
    #[arg(long)]
    pub duration: Option<i64>,
}

// Everything is optional here so that form validation can report all
// missing fields at once.
#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub barber: String,

    #[arg(long, default_value = "")]
    pub service: String,

    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Time as H:MM, one of the times listed by `slots`
    #[arg(long)]
    pub time: Option<Slot>,
}

impl BookArgs {
    pub fn to_form(&self) -> BookingForm {
        BookingForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            barber_id: self.barber.clone(),
            service_id: self.service.clone(),
            date: self.date,
            time: self.time,
        }
    }
}
