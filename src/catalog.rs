use crate::types::{Service, ServiceId};
use std::{collections::HashSet, fs, path::Path, sync::Arc};
use thiserror::Error;

/// Read-only list of services a customer can book.
pub trait ServiceCatalog: Clone + Send + Sync + 'static {
    fn list(&self) -> Vec<Service>;

    fn exists(&self, id: ServiceId) -> bool {
        self.list().iter().any(|service| service.id == id)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read services file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse services file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("service {id} has an invalid price, expected a non-negative number")]
    InvalidPrice { id: ServiceId },

    #[error("service id {id} is listed more than once")]
    DuplicateId { id: ServiceId },
}

#[derive(Debug, Clone)]
pub struct StaticCatalog {
    services: Arc<[Service]>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        let service = |id, name: &str, price| Service {
            id,
            name: name.into(),
            price,
        };
        Self {
            services: vec![
                service(1, "Cut", 30.00),
                service(2, "Beard", 20.00),
                service(3, "Cut & Beard", 45.00),
            ]
            .into(),
        }
    }
}

impl StaticCatalog {
    pub fn new(services: Vec<Service>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for service in &services {
            if service.price.is_nan() || service.price < 0.0 {
                return Err(CatalogError::InvalidPrice { id: service.id });
            }
            if !ids.insert(service.id) {
                return Err(CatalogError::DuplicateId { id: service.id });
            }
        }
        Ok(Self {
            services: services.into(),
        })
    }

    /// Loads a JSON array of `{id, name, price}` objects.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::new(serde_json::from_str(&contents)?)
    }
}

impl ServiceCatalog for StaticCatalog {
    fn list(&self) -> Vec<Service> {
        self.services.to_vec()
    }
}
