use crate::core::availability::SlotCalculator;
use crate::core::booking::BookingForm;
use crate::core::{Appointment, Barber, BookingApi, ConfigProvider, NewAppointment, Service, Slot, SlotRequest};
use crate::utils::error::{BookingError, Result};
use chrono::{NaiveDate, TimeZone, Utc};

/// Fetches from the booking API and feeds the results to the slot calculator.
pub struct BookingEngine<A: BookingApi, Tz: TimeZone> {
    api: A,
    calculator: SlotCalculator<Tz>,
}

impl<A: BookingApi, Tz: TimeZone> BookingEngine<A, Tz> {
    pub fn new(api: A, calculator: SlotCalculator<Tz>) -> Self {
        Self { api, calculator }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(api: A, tz: Tz, config: &C) -> Self {
        let calculator =
            SlotCalculator::new(tz).with_conflict_matching(config.conflict_matching());
        Self::new(api, calculator)
    }

    /// Today's date in the engine's time zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now()
            .with_timezone(self.calculator.time_zone())
            .date_naive()
    }

    pub async fn barbers(&self) -> Result<Vec<Barber>> {
        let barbers = self.api.barbers().await?;
        tracing::debug!("Fetched {} barbers", barbers.len());
        Ok(barbers)
    }

    pub async fn services(&self) -> Result<Vec<Service>> {
        let services = self.api.services().await?;
        tracing::debug!("Fetched {} services", services.len());
        Ok(services)
    }

    pub async fn service_duration(&self, service_id: &str) -> Result<i64> {
        self.services()
            .await?
            .into_iter()
            .find(|service| service.id == service_id)
            .map(|service| service.duration)
            .ok_or_else(|| BookingError::UnknownService {
                id: service_id.to_string(),
            })
    }

    /// Free slots for the request. An unknown barber gives an empty list.
    pub async fn available_slots(&self, request: &SlotRequest) -> Result<Vec<Slot>> {
        let (barber, appointments) = self.fetch_schedule(&request.barber_id).await?;
        if barber.is_none() {
            tracing::warn!("No barber with id {}", request.barber_id);
        }

        let slots = self.calculator.compute_available_slots(
            barber.as_ref(),
            &appointments,
            request.date,
            request.service_duration_minutes,
        )?;

        tracing::info!(
            "{} free slots for barber {} on {} ({} min steps)",
            slots.len(),
            request.barber_id,
            request.date,
            request.service_duration_minutes
        );
        Ok(slots)
    }

    /// Validates the form, re-checks that the chosen time is still free and
    /// submits it. Returns the submitted appointment.
    pub async fn book(&self, form: &BookingForm, today: NaiveDate) -> Result<NewAppointment> {
        form.validate(today).map_err(BookingError::FormValidation)?;
        let appointment = form.to_new_appointment(self.calculator.time_zone())?;

        let duration = self.service_duration(&form.service_id).await?;
        let (barber, appointments) = self.fetch_schedule(&form.barber_id).await?;
        let barber = barber.ok_or_else(|| BookingError::UnknownBarber {
            id: form.barber_id.clone(),
        })?;

        if let (Some(date), Some(time)) = (form.date, form.time) {
            let free = self.calculator.compute_available_slots(
                Some(&barber),
                &appointments,
                date,
                duration,
            )?;
            if !free.contains(&time) {
                tracing::warn!("{} on {} is not free for barber {}", time, date, barber.id);
                return Err(BookingError::SlotUnavailable {
                    date: date.to_string(),
                    time: time.to_string(),
                });
            }
        }

        self.api.book_appointment(&appointment).await?;
        tracing::info!(
            "Booked {} with {} (service {}) at {}",
            form.first_name,
            barber.display_name(),
            appointment.service_id,
            appointment.start_date
        );
        Ok(appointment)
    }

    /// The barber, plus all appointments when the barber exists.
    async fn fetch_schedule(&self, barber_id: &str) -> Result<(Option<Barber>, Vec<Appointment>)> {
        let barber = self
            .barbers()
            .await?
            .into_iter()
            .find(|barber| barber.id == barber_id);

        let appointments = match barber {
            Some(_) => self.api.appointments().await?,
            None => Vec::new(),
        };
        tracing::debug!("Fetched {} appointments", appointments.len());

        Ok((barber, appointments))
    }
}
