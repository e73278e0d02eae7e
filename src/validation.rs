use crate::types::Slot;
use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_FORMAT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref SLOT_FORMAT: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !DATE_FORMAT.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Parses a strict `HH:MM` time of day. Membership in the grid is checked by the calendar.
pub fn parse_slot(raw: &str) -> Option<Slot> {
    let raw = raw.trim();
    if !SLOT_FORMAT.is_match(raw) {
        return None;
    }
    NaiveTime::parse_from_str(raw, "%H:%M").ok().map(Slot::new)
}
