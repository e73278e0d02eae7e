use crate::{types::Slot, validation::parse_slot};
use chrono::NaiveTime;
use std::sync::Arc;

const DEFAULT_SLOTS: [(u32, u32); 14] = [
    (9, 0),
    (9, 30),
    (10, 0),
    (10, 30),
    (11, 0),
    (11, 30),
    (12, 0),
    (14, 0),
    (14, 30),
    (15, 0),
    (15, 30),
    (16, 0),
    (16, 30),
    (17, 0),
];

/// The fixed daily grid of bookable slots, ordered by time of day.
#[derive(Debug, Clone)]
pub struct SlotCalendar {
    slots: Arc<[Slot]>,
}

impl Default for SlotCalendar {
    fn default() -> Self {
        Self::new(
            DEFAULT_SLOTS
                .iter()
                .filter_map(|&(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
                .map(Slot::new)
                .collect(),
        )
    }
}

impl SlotCalendar {
    /// Falls back to the default grid when `slots` is empty.
    pub fn new(mut slots: Vec<Slot>) -> Self {
        if slots.is_empty() {
            return Self::default();
        }
        slots.sort_unstable();
        slots.dedup();
        Self {
            slots: slots.into(),
        }
    }

    pub fn all_slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_valid_slot(&self, slot: &Slot) -> bool {
        self.slots.binary_search(slot).is_ok()
    }

    /// Returns the slot only if `raw` is well formed and part of the grid.
    pub fn slot(&self, raw: &str) -> Option<Slot> {
        parse_slot(raw).filter(|slot| self.is_valid_slot(slot))
    }
}
