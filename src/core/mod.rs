pub mod availability;
pub mod booking;
pub mod engine;

pub use crate::domain::model::{
    Appointment, Barber, ConflictMatching, LunchBreak, NewAppointment, Service, Slot, SlotRequest,
    WorkHours,
};
pub use crate::domain::ports::{BookingApi, ConfigProvider};
pub use crate::utils::error::Result;
