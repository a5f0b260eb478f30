use crate::domain::model::{Appointment, Barber, ConflictMatching, LunchBreak, Slot};
use crate::utils::error::{BookingError, Result};
use chrono::{Datelike, NaiveDate, TimeZone, Timelike};

/// Hours past this are clamped; a work day cannot run past midnight.
const HOURS_PER_DAY: u32 = 24;

/// Computes bookable start times for one barber on one date.
///
/// `tz` decides what "local" hour and minute an appointment timestamp maps
/// to. The calculator is pure: it never fetches anything and holds no state
/// beyond its settings.
#[derive(Debug, Clone)]
pub struct SlotCalculator<Tz: TimeZone> {
    tz: Tz,
    conflict_matching: ConflictMatching,
}

impl<Tz: TimeZone> SlotCalculator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            conflict_matching: ConflictMatching::default(),
        }
    }

    pub fn with_conflict_matching(mut self, conflict_matching: ConflictMatching) -> Self {
        self.conflict_matching = conflict_matching;
        self
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    pub fn conflict_matching(&self) -> ConflictMatching {
        self.conflict_matching
    }

    /// Returns the free slots in ascending order.
    ///
    /// An unknown barber, a day without work hours and a fully booked day all
    /// yield an empty vector. A non-positive `service_duration_minutes` is an
    /// `InvalidArgument` error.
    pub fn compute_available_slots(
        &self,
        barber: Option<&Barber>,
        appointments: &[Appointment],
        date: NaiveDate,
        service_duration_minutes: i64,
    ) -> Result<Vec<Slot>> {
        if service_duration_minutes <= 0 {
            return Err(BookingError::invalid_argument(
                "service_duration_minutes",
                format!("must be positive, got {}", service_duration_minutes),
            ));
        }

        let Some(barber) = barber else {
            return Ok(Vec::new());
        };

        let weekday = date.weekday().num_days_from_sunday();
        let Some(hours) = barber.work_hours_for(weekday) else {
            return Ok(Vec::new());
        };

        let booked: Vec<Slot> = appointments
            .iter()
            .filter(|appointment| appointment.barber_id == barber.id)
            .filter_map(|appointment| self.booked_slot(appointment, date))
            .collect();

        let step = usize::try_from(service_duration_minutes).unwrap_or(usize::MAX);
        let slots = candidate_slots(hours.start_hour, hours.end_hour, step)
            .filter(|slot| !booked.contains(slot))
            .filter(|slot| !in_lunch_break(&hours.lunch_break, slot))
            .collect();

        Ok(slots)
    }

    /// Local start time of an appointment, if it can block a slot on `date`.
    fn booked_slot(&self, appointment: &Appointment, date: NaiveDate) -> Option<Slot> {
        let start = self.tz.timestamp_opt(appointment.start_date, 0).single()?;

        if self.conflict_matching == ConflictMatching::SameDate && start.date_naive() != date {
            return None;
        }

        Some(Slot::new(start.hour(), start.minute()))
    }
}

/// Every `step` minutes within each hour of `[start_hour, end_hour)`, starting
/// at minute 0 of each hour. The last slot is not clipped to `end_hour`.
fn candidate_slots(start_hour: u32, end_hour: u32, step: usize) -> impl Iterator<Item = Slot> {
    (start_hour..end_hour.min(HOURS_PER_DAY)).flat_map(move |hour| {
        (0..60)
            .step_by(step)
            .map(move |minute| Slot::new(hour, minute))
    })
}

fn in_lunch_break(lunch: &LunchBreak, slot: &Slot) -> bool {
    let start = lunch.start_hour.saturating_mul(60);
    let end = start.saturating_add(lunch.duration_minutes);
    (start..end).contains(&slot.minute_of_day())
}
