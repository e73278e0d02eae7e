use crate::{configuration::Configuration, types::Slot};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Appointment booking server")]
pub struct ConfigurationHandler {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: String,

    /// PostgreSQL connection URL. Appointments are kept in memory if omitted.
    #[arg(short, long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// JSON file with the offered services, `[{"id": 1, "name": "Cut", "price": 30.0}]`
    #[arg(short, long, env = "SERVICES_FILE")]
    services_file: Option<PathBuf>,

    /// Comma separated HH:MM slots replacing the default daily grid
    #[arg(long, env = "SLOTS", value_delimiter = ',')]
    slots: Vec<Slot>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn services_file(&self) -> Option<PathBuf> {
        self.services_file.clone()
    }

    fn slots(&self) -> Vec<Slot> {
        self.slots.clone()
    }
}
