use crate::{
    backend::BookingStore,
    errors::StoreError,
    schema::appointments,
    types::{Appointment, AppointmentId, Booking, Slot},
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{
    r2d2::{ConnectionManager, Pool, PoolError, PooledConnection},
    result::{DatabaseErrorKind, Error as DieselError},
    ExpressionMethods, Insertable, PgConnection, QueryDsl, Queryable, RunQueryDsl, Selectable,
    SelectableHelper,
};
use std::{collections::BTreeSet, time::Duration};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Insertable)]
#[diesel(table_name = appointments)]
struct NewAppointment<'a> {
    id: Uuid,
    customer_name: &'a str,
    service_id: i32,
    appointment_date: NaiveDate,
    appointment_time: String,
    created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = appointments)]
struct AppointmentRow {
    id: Uuid,
    customer_name: String,
    service_id: i32,
    appointment_date: NaiveDate,
    appointment_time: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = StoreError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            customer_name: row.customer_name,
            service_id: row.service_id,
            date: row.appointment_date,
            time: parse_stored_slot(&row.appointment_time)?,
            created_at: row.created_at,
        })
    }
}

fn parse_stored_slot(raw: &str) -> Result<Slot, StoreError> {
    raw.parse().map_err(|err: String| {
        error!(%err, "Corrupt slot in database");
        StoreError::Unavailable(err)
    })
}

fn unavailable(context: &str, err: impl std::fmt::Display) -> StoreError {
    error!(%err, "{context}");
    StoreError::Unavailable(format!("{context}: {err}"))
}

/// PostgreSQL appointments. Double bookings are rejected by the
/// `UNIQUE (appointment_date, appointment_time)` constraint.
#[derive(Clone)]
pub struct DatabaseInterface {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl DatabaseInterface {
    pub fn new(database_url: &str) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)?;
        Ok(Self { pool })
    }

    fn connection(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StoreError> {
        self.pool
            .get()
            .map_err(|err| unavailable("Failed to get database connection", err))
    }

    #[cfg(test)]
    fn remove_all_appointments(&self) {
        let mut connection = self.connection().unwrap();
        diesel::delete(appointments::table)
            .execute(&mut *connection)
            .unwrap();
    }
}

impl BookingStore for DatabaseInterface {
    fn booked_slots(&self, date: NaiveDate) -> Result<BTreeSet<Slot>, StoreError> {
        let mut connection = self.connection()?;
        let times = appointments::table
            .filter(appointments::appointment_date.eq(date))
            .select(appointments::appointment_time)
            .load::<String>(&mut *connection)
            .map_err(|err| unavailable("Failed to read booked slots", err))?;

        times.iter().map(|raw| parse_stored_slot(raw)).collect()
    }

    fn reserve(
        &self,
        date: NaiveDate,
        time: Slot,
        booking: Booking,
    ) -> Result<AppointmentId, StoreError> {
        let mut connection = self.connection()?;
        let id = Uuid::new_v4();
        let appointment = NewAppointment {
            id,
            customer_name: &booking.customer_name,
            service_id: booking.service_id,
            appointment_date: date,
            appointment_time: time.to_string(),
            created_at: Utc::now(),
        };
        debug!(%id, customer_name = %booking.customer_name, "Inserting appointment");

        let result = diesel::insert_into(appointments::table)
            .values(&appointment)
            .execute(&mut *connection);

        match result {
            Ok(_) => {
                info!(%id, %date, %time, "Slot reserved");
                Ok(id)
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                warn!(%date, %time, "Slot was already booked");
                Err(StoreError::Conflict { date, time })
            }
            Err(err) => Err(unavailable("Appointment can't be stored", err)),
        }
    }

    fn appointments(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        let mut connection = self.connection()?;
        let rows = appointments::table
            .filter(appointments::appointment_date.eq(date))
            .order(appointments::appointment_time.asc())
            .select(AppointmentRow::as_select())
            .load(&mut *connection)
            .map_err(|err| unavailable("Failed to read appointments", err))?;

        rows.into_iter().map(Appointment::try_from).collect()
    }
}
