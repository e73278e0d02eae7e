use crate::{
    backend::BookingStore,
    errors::BookingError,
    slot_calendar::SlotCalendar,
    types::{Slot, SlotAvailability, SlotStatus},
    validation::parse_date,
};
use chrono::NaiveDate;

/// Per-date slot status, always read fresh from the store.
#[derive(Clone)]
pub struct AvailabilityService<T: BookingStore> {
    calendar: SlotCalendar,
    store: T,
}

impl<T: BookingStore> AvailabilityService<T> {
    pub fn new(calendar: SlotCalendar, store: T) -> Self {
        Self { calendar, store }
    }

    /// An empty date yields no slots, as nothing is selectable before a date is chosen.
    pub fn availability(&self, date: &str) -> Result<Vec<SlotAvailability>, BookingError> {
        match Self::requested_date(date)? {
            Some(date) => self.availability_on(date),
            None => Ok(vec![]),
        }
    }

    pub fn availability_on(&self, date: NaiveDate) -> Result<Vec<SlotAvailability>, BookingError> {
        let booked = self.store.booked_slots(date)?;
        Ok(self
            .calendar
            .all_slots()
            .iter()
            .map(|&time| SlotAvailability {
                time,
                status: if booked.contains(&time) {
                    SlotStatus::Taken
                } else {
                    SlotStatus::Free
                },
            })
            .collect())
    }

    pub fn booked_times(&self, date: &str) -> Result<Vec<Slot>, BookingError> {
        match Self::requested_date(date)? {
            Some(date) => Ok(self.store.booked_slots(date)?.into_iter().collect()),
            None => Ok(vec![]),
        }
    }

    fn requested_date(date: &str) -> Result<Option<NaiveDate>, BookingError> {
        if date.trim().is_empty() {
            return Ok(None);
        }
        parse_date(date)
            .map(Some)
            .ok_or_else(|| BookingError::invalid("invalid date"))
    }
}
