use std::{error::Error, time::Duration};

use crate::{
    catalog::StaticCatalog, configuration::Configuration,
    configuration_handler::ConfigurationHandler, database_interface::DatabaseInterface,
    http::create_app, local_bookings::LocalBookings, slot_calendar::SlotCalendar,
};
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod booking_service;
mod catalog;
mod configuration;
mod configuration_handler;
mod database_interface;
mod errors;
mod http;
mod local_bookings;
mod schema;
mod slot_calendar;
#[cfg(test)]
mod testutils;
mod types;
mod validation;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let catalog = match configuration.services_file() {
        Some(path) => StaticCatalog::from_file(&path)?,
        None => StaticCatalog::default(),
    };
    let calendar = SlotCalendar::new(configuration.slots());
    info!(
        slots = calendar.all_slots().len(),
        "Loaded service catalog and slot grid"
    );

    let address = format!("0.0.0.0:{}", configuration.port());
    let listener = tokio::net::TcpListener::bind(address.as_str()).await?;
    info!("Accessible at {address}");

    let app = if let Some(database_url) = configuration.database_url() {
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(%err, "Failed to establish database connection. Retry in 1 sec. Start without a database URL to keep appointments in memory.");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(backend, catalog, calendar)
    } else {
        info!("No database configured, appointments are kept in memory");
        create_app(LocalBookings::default(), catalog, calendar)
    };

    axum::serve(listener, app).await?;
    Ok(())
}
