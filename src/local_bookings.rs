use crate::{
    backend::BookingStore,
    errors::StoreError,
    types::{Appointment, AppointmentId, Booking, Slot},
};
use chrono::{NaiveDate, Utc};
use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet, HashMap},
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

type DayBook = Arc<Mutex<BTreeMap<Slot, Appointment>>>;

/// In-memory appointments, locked per date so that bookings on different days never contend.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    days: Arc<Mutex<HashMap<NaiveDate, DayBook>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    let err = "Booking lock poisoned";
    error!(err);
    StoreError::Unavailable(err.into())
}

impl LocalBookings {
    fn day(&self, date: NaiveDate) -> Result<DayBook, StoreError> {
        let mut days = self.days.lock().map_err(poisoned)?;
        Ok(days.entry(date).or_default().clone())
    }

    fn existing_day(&self, date: NaiveDate) -> Result<Option<DayBook>, StoreError> {
        Ok(self.days.lock().map_err(poisoned)?.get(&date).cloned())
    }
}

impl BookingStore for LocalBookings {
    fn booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<Slot>, StoreError> {
        match self.existing_day(date)? {
            Some(day) => Ok(day.lock().map_err(poisoned)?.keys().copied().collect()),
            None => Ok(BTreeSet::new()),
        }
    }

    fn reserve(
        &self,
        date: NaiveDate,
        time: Slot,
        booking: Booking,
    ) -> Result<AppointmentId, StoreError> {
        let day = self.day(date)?;
        let mut appointments = day.lock().map_err(poisoned)?;

        match appointments.entry(time) {
            Entry::Occupied(_) => {
                warn!(%date, %time, "Slot was already booked");
                Err(StoreError::Conflict { date, time })
            }
            Entry::Vacant(entry) => {
                let id = Uuid::new_v4();
                debug!(%id, customer_name = %booking.customer_name, "Recording appointment");
                entry.insert(Appointment {
                    id,
                    customer_name: booking.customer_name,
                    service_id: booking.service_id,
                    date,
                    time,
                    created_at: Utc::now(),
                });
                info!(%id, %date, %time, "Slot reserved");
                Ok(id)
            }
        }
    }

    fn appointments(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        match self.existing_day(date)? {
            Some(day) => Ok(day.lock().map_err(poisoned)?.values().cloned().collect()),
            None => Ok(vec![]),
        }
    }
}
