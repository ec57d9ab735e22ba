//! Field validators shared by the entity input structs.

use std::borrow::Cow;

use validator::ValidationError;

use crate::schedule;

fn fail(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn min_trimmed(value: &str, min: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(fail("length", message));
    }
    Ok(())
}

pub fn full_name(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, 3, "must be at least 3 characters")
}

pub fn description(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, 5, "must be at least 5 characters")
}

pub fn pet_name(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, 2, "must be at least 2 characters")
}

pub fn address(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, 5, "must be at least 5 characters")
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, 1, "is required")
}

/// Optional leading `+`, then 7 to 15 digits; spaces and dashes are ignored.
pub fn phone(value: &str) -> Result<(), ValidationError> {
    let body = value.trim();
    let body = body.strip_prefix('+').unwrap_or(body);
    let mut digits = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => return Err(fail("phone", "must be a valid phone number")),
        }
    }
    if !(7..=15).contains(&digits) {
        return Err(fail("phone", "must be a valid phone number"));
    }
    Ok(())
}

/// `H:MM` or `HH:MM` on a 24h clock. Business-hour rules are applied separately.
pub fn hhmm(value: &str) -> Result<(), ValidationError> {
    if schedule::parse_hhmm(value).is_none() {
        return Err(fail("time_format", "must use HH:MM format"));
    }
    Ok(())
}
