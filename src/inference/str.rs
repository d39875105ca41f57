use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::ir::Primitive;

/// Which ISO-8601 shape a string matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso8601 {
    /// `2021-01-01T00:00:00Z`, `2021-01-01T00:00:00.5+02:00`
    Rfc3339,
    /// offset written without a colon: `2021-01-01T00:00:00+0200`
    CompactOffset,
    /// no offset: `2021-01-01T00:00:00`, `2021-01-01T00:00`
    Local,
    /// `2021-01-01`
    Date,
}

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Try every supported ISO-8601 shape. `None` means "plain string".
pub fn parse_iso8601(s: &str) -> Option<Iso8601> {
    // cheap gate: everything we accept starts with a digit
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return Some(Iso8601::Rfc3339);
    }
    if DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z").is_ok() {
        return Some(Iso8601::CompactOffset);
    }
    if LOCAL_FORMATS.iter().any(|f| NaiveDateTime::parse_from_str(s, f).is_ok()) {
        return Some(Iso8601::Local);
    }
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        return Some(Iso8601::Date);
    }
    None
}

/// Strings that parse as a calendar date/time are promoted to `DateTime`.
pub fn classify_str(s: &str) -> Primitive {
    match parse_iso8601(s) {
        Some(_) => Primitive::DateTime,
        None => Primitive::String,
    }
}
