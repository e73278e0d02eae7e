use crate::{
    availability::AvailabilityService,
    backend::BookingStore,
    booking_service::{BookingRequest, BookingService},
    catalog::ServiceCatalog,
    errors::{BookingError, ErrorClass},
    slot_calendar::SlotCalendar,
    types::{AppointmentId, ServiceId},
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de::IgnoredAny, Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

#[derive(Clone)]
pub struct AppState<T: BookingStore, C: ServiceCatalog> {
    availability: AvailabilityService<T>,
    booking_service: BookingService<T, C>,
    catalog: C,
}

/// Envelope shared by every response: `{success, data?, message?}`.
#[derive(Debug, Serialize, Deserialize)]
struct ApiResponse<D> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<D> ApiResponse<D> {
    fn data(data: D) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Confirmation {
    id: AppointmentId,
}

/// Browser forms post the selected service as a string. Any other shape is
/// kept so that it fails as an unknown service, after the name check.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServiceIdField {
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

impl ServiceIdField {
    fn service_id(&self) -> Option<ServiceId> {
        match self {
            Self::Number(id) => ServiceId::try_from(*id).ok(),
            Self::Text(id) => id.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScheduleRequest {
    customer_name: String,
    service_id: Option<ServiceIdField>,
    date: String,
    time: String,
}

impl From<ScheduleRequest> for BookingRequest {
    fn from(request: ScheduleRequest) -> Self {
        BookingRequest {
            customer_name: request.customer_name,
            service_id: request.service_id.as_ref().and_then(ServiceIdField::service_id),
            date: request.date,
            time: request.time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    date: Option<String>,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        if self.class() == ErrorClass::Server {
            error!(err = %self, "Request failed on the server side");
        }
        let status = match self {
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotTaken { .. } => StatusCode::CONFLICT,
            BookingError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

pub fn create_app<T, C>(store: T, catalog: C, calendar: SlotCalendar) -> Router
where
    T: BookingStore,
    C: ServiceCatalog,
{
    let state = AppState {
        availability: AvailabilityService::new(calendar.clone(), store.clone()),
        booking_service: BookingService::new(calendar, store, catalog.clone()),
        catalog,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/services", get(get_services))
        .route("/api/booked-times/:date", get(get_booked_times))
        .route("/api/availability", get(get_availability))
        .route("/api/schedule", post(schedule))
        .with_state(state)
        .layer(cors)
}

/// Store calls may block on I/O, so they run on the blocking pool. A request
/// dropped by its client does not cancel a reservation already in flight.
async fn blocking<R, F>(task: F) -> Result<R, BookingError>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R, BookingError> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|err| {
        error!(?err, "Blocking store task failed");
        BookingError::StoreUnavailable("store task failed".into())
    })?
}

async fn get_services<T: BookingStore, C: ServiceCatalog>(
    State(state): State<AppState<T, C>>,
) -> impl IntoResponse {
    ApiResponse::data(state.catalog.list())
}

async fn get_booked_times<T: BookingStore, C: ServiceCatalog>(
    State(state): State<AppState<T, C>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    let booked = blocking(move || state.availability.booked_times(&date)).await?;
    Ok(ApiResponse::data(booked))
}

async fn get_availability<T: BookingStore, C: ServiceCatalog>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, BookingError> {
    let date = query.date.unwrap_or_default();
    let slots = blocking(move || state.availability.availability(&date)).await?;
    Ok(ApiResponse::data(slots))
}

async fn schedule<T: BookingStore, C: ServiceCatalog>(
    State(state): State<AppState<T, C>>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(%rejection, "Rejected booking request body");
        BookingError::InvalidInput(rejection.body_text())
    })?;
    let request = BookingRequest::from(request);
    let id = blocking(move || state.booking_service.submit(request)).await?;

    let body = ApiResponse {
        success: true,
        data: Some(Confirmation { id }),
        message: Some("Appointment confirmed".to_string()),
    };
    Ok((StatusCode::CREATED, Json(body)))
}
