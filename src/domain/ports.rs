use crate::domain::model::{Appointment, Barber, ConflictMatching, NewAppointment, Service};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::FixedOffset;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn conflict_matching(&self) -> ConflictMatching;
    /// `None` means the system's local time zone.
    fn utc_offset(&self) -> Result<Option<FixedOffset>>;
    /// Slot step used when no service is chosen.
    fn default_slot_minutes(&self) -> i64;
}

/// The booking backend: barber directory, service catalog, appointments.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn barbers(&self) -> Result<Vec<Barber>>;
    async fn services(&self) -> Result<Vec<Service>>;
    /// All appointments, for every barber.
    async fn appointments(&self) -> Result<Vec<Appointment>>;
    async fn book_appointment(&self, appointment: &NewAppointment) -> Result<()>;
}
