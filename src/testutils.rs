use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use chrono::NaiveDate;

use crate::{
    backend::BookingStore,
    errors::StoreError,
    local_bookings::LocalBookings,
    types::{Appointment, AppointmentId, Booking, Slot},
};

/// Counts store calls and forwards them to an in-memory store unless told to fail.
pub struct MockBookingStoreInner {
    pub success: AtomicBool,
    pub calls_to_booked_slots: AtomicU64,
    pub calls_to_reserve: AtomicU64,
    pub calls_to_appointments: AtomicU64,
    pub bookings: LocalBookings,
}

#[derive(Clone)]
pub struct MockBookingStore(pub Arc<MockBookingStoreInner>);

impl MockBookingStoreInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_booked_slots: AtomicU64::default(),
            calls_to_reserve: AtomicU64::default(),
            calls_to_appointments: AtomicU64::default(),
            bookings: LocalBookings::default(),
        }
    }
}

impl MockBookingStore {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingStoreInner::new()))
    }

    fn result(&self) -> Result<(), StoreError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StoreError::Unavailable("Supposed to fail".into())),
        }
    }
}

impl BookingStore for MockBookingStore {
    fn booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<Slot>, StoreError> {
        self.0.calls_to_booked_slots.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0.bookings.booked_slots(date)
    }

    fn reserve(
        &self,
        date: NaiveDate,
        time: Slot,
        booking: Booking,
    ) -> Result<AppointmentId, StoreError> {
        self.0.calls_to_reserve.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0.bookings.reserve(date, time, booking)
    }

    fn appointments(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        self.0.calls_to_appointments.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0.bookings.appointments(date)
    }
}
