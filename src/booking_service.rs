use crate::{
    backend::BookingStore,
    catalog::ServiceCatalog,
    errors::BookingError,
    slot_calendar::SlotCalendar,
    types::{AppointmentId, Booking, ServiceId},
    validation::parse_date,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

/// An unvalidated booking as submitted by a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRequest {
    pub customer_name: String,
    /// `None` when the client sent no usable id.
    pub service_id: Option<ServiceId>,
    pub date: String,
    pub time: String,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The single write path for appointments.
#[derive(Clone)]
pub struct BookingService<T: BookingStore, C: ServiceCatalog> {
    calendar: SlotCalendar,
    store: T,
    catalog: C,
    today: fn() -> NaiveDate,
}

impl<T: BookingStore, C: ServiceCatalog> BookingService<T, C> {
    pub fn new(calendar: SlotCalendar, store: T, catalog: C) -> Self {
        Self {
            calendar,
            store,
            catalog,
            today: local_today,
        }
    }

    #[cfg(test)]
    fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Validates `request` and reserves its slot.
    ///
    /// Checks run in a fixed order and the first failure is returned: name,
    /// service, date, time, then occupancy. The occupancy check here only
    /// avoids a pointless write; the store decides at commit time, and a
    /// conflict there is reported as [`BookingError::SlotTaken`] as well.
    pub fn submit(&self, request: BookingRequest) -> Result<AppointmentId, BookingError> {
        let customer_name = request.customer_name.trim();
        if customer_name.is_empty() {
            return Err(BookingError::invalid("name required"));
        }

        let service_id = request
            .service_id
            .filter(|&id| self.catalog.exists(id))
            .ok_or_else(|| BookingError::invalid("unknown service"))?;

        let today = (self.today)();
        let date = parse_date(&request.date)
            .filter(|&date| date >= today)
            .ok_or_else(|| BookingError::invalid("invalid date"))?;

        let time = self
            .calendar
            .slot(&request.time)
            .ok_or_else(|| BookingError::invalid("invalid time"))?;

        if self.store.booked_slots(date)?.contains(&time) {
            warn!(%date, %time, "Requested slot is already taken");
            return Err(BookingError::SlotTaken { date, time });
        }

        let booking = Booking {
            customer_name: customer_name.to_string(),
            service_id,
        };
        let id = self.store.reserve(date, time, booking)?;
        info!(%id, service_id, %date, %time, "Appointment confirmed");
        Ok(id)
    }
}
