use crate::types::Slot;
use chrono::NaiveDate;
use thiserror::Error;

/// Failures of the persistence layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("slot {time} on {date} is already booked")]
    Conflict { date: NaiveDate, time: Slot },

    #[error("booking store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("slot {time} on {date} is already taken")]
    SlotTaken { date: NaiveDate, time: Slot },

    #[error("booking store unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

impl BookingError {
    pub fn invalid(reason: &str) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput(_) | Self::SlotTaken { .. } => ErrorClass::Client,
            Self::StoreUnavailable(_) => ErrorClass::Server,
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { date, time } => Self::SlotTaken { date, time },
            StoreError::Unavailable(reason) => Self::StoreUnavailable(reason),
        }
    }
}
