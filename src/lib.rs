pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    availability::SlotCalculator, booking::BookingForm, engine::BookingEngine,
};
pub use adapters::http::HttpBookingApi;
pub use config::toml_config::TomlConfig;
pub use utils::error::{BookingError, Result};
