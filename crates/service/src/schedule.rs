//! Appointment-time rules for medical records.
//!
//! Slots open at 09:00 and the last one starts at 17:00; only `:00` and `:30`
//! are bookable.

use thiserror::Error;

pub const OPENING_MINUTE: u32 = 9 * 60;
pub const CLOSING_MINUTE: u32 = 17 * 60;
pub const SLOT_MINUTES: u32 = 30;

pub const INVALID_TIME_MESSAGE: &str =
    "Invalid appointment time. Must be between 09:00-17:00 in 30-min blocks.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", INVALID_TIME_MESSAGE)]
pub struct ScheduleRejected {
    pub time: String,
}

/// Parse `H:MM` or `HH:MM` into `(hours, minutes)`.
pub fn parse_hhmm(time: &str) -> Option<(u32, u32)> {
    let (h, m) = time.split_once(':')?;
    if !(1..=2).contains(&h.len()) || m.len() != 2 {
        return None;
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((hours, minutes))
}

pub fn validate_time(time: &str) -> Result<(), ScheduleRejected> {
    let rejected = || ScheduleRejected { time: time.to_string() };
    let (hours, minutes) = parse_hhmm(time).ok_or_else(rejected)?;
    let total = hours * 60 + minutes;
    if !(OPENING_MINUTE..=CLOSING_MINUTE).contains(&total) {
        return Err(rejected());
    }
    if minutes % SLOT_MINUTES != 0 {
        return Err(rejected());
    }
    Ok(())
}
