//! Due-date parsing and display.
//!
//! Backends store whatever the client sent, so a due date may arrive as full
//! RFC 3339, as a local wall-clock `YYYY-MM-DDTHH:MM` (what an HTML
//! `datetime-local` input produces) or as a bare date.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::TodoError;

/// Rendered in place of a due date that cannot be parsed.
pub const INVALID_DATE: &str = "invalid date";

/// Parse a raw due date. Wall-clock values are interpreted in `local`.
pub fn parse_due(raw: &str, local: UtcOffset) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(due) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(due);
    }
    if let Some(wall_clock) = parse_wall_clock(raw) {
        return Some(wall_clock.assume_offset(local));
    }
    parse_date(raw).map(|date| date.midnight().assume_utc())
}

fn parse_wall_clock(raw: &str) -> Option<PrimitiveDateTime> {
    let formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];
    formats
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(raw, *format).ok())
}

fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

/// Calendar date of a timestamp in the local offset. `None` when the shift
/// leaves the supported date range.
pub fn local_date(due: OffsetDateTime, local: UtcOffset) -> Option<Date> {
    due.checked_to_offset(local).map(|due| due.date())
}

/// Long display form `YYYY/MM/DD HH:MM` in the local offset.
pub fn format_timestamp(due: OffsetDateTime, local: UtcOffset) -> String {
    due.checked_to_offset(local)
        .and_then(|due| {
            due.format(format_description!("[year]/[month]/[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Display form of a raw due date; empty for no date, [`INVALID_DATE`] when unparsable.
pub fn format_due(raw: &str, local: UtcOffset) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_due(raw, local) {
        Some(due) => format_timestamp(due, local),
        None => INVALID_DATE.to_string(),
    }
}

/// Heading for a day bucket.
pub fn format_day(date: Date) -> String {
    date.format(format_description!("[year]/[month]/[day]"))
        .unwrap_or_else(|_| INVALID_DATE.to_string())
}

/// Validate a due date typed by the user and turn it into the wire form
/// `YYYY-MM-DDTHH:MM` (local wall-clock). Blank input means no due date.
///
/// A bare date is taken as local midnight.
pub fn normalize_due_input(input: &str, local: UtcOffset) -> Result<Option<String>, TodoError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let wall_clock = parse_wall_clock(input)
        .or_else(|| parse_date(input).map(Date::midnight))
        .or_else(|| {
            OffsetDateTime::parse(input, &Rfc3339)
                .ok()
                .and_then(|due| due.checked_to_offset(local))
                .map(|due| PrimitiveDateTime::new(due.date(), due.time()))
        })
        .ok_or_else(|| TodoError::InvalidDueDate(input.to_string()))?;

    wall_clock
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]"))
        .map(Some)
        .map_err(|_| TodoError::InvalidDueDate(input.to_string()))
}
