use crate::{
    errors::StoreError,
    types::{Appointment, AppointmentId, Booking, Slot},
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Sole owner of confirmed appointments and final authority on slot occupancy.
///
/// Implementations must make `reserve` an atomic compare-and-insert on
/// `(date, time)`: of any number of concurrent attempts on the same pair,
/// exactly one succeeds and the rest get [`StoreError::Conflict`]. A failed
/// attempt leaves no trace.
pub trait BookingStore: Clone + Send + Sync + 'static {
    fn booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<Slot>, StoreError>;
    fn reserve(
        &self,
        date: NaiveDate,
        time: Slot,
        booking: Booking,
    ) -> Result<AppointmentId, StoreError>;
    fn appointments(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError>;
}
