//! Tolerant date-time parsing for stored and submitted timestamps.
//!
//! Records keep their timestamps as text (`DD/MM/YYYY HH:MM`), so every
//! comparison goes through [`parse_local_datetime`], which never fails:
//! unusable input simply yields `None`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};

/// Canonical storage / display format.
pub const LOCAL_FORMAT: &str = "%d/%m/%Y %H:%M";

const LOCAL_FORMATS: [&str; 2] = ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"];
const LOCAL_DATE_FORMAT: &str = "%d/%m/%Y";

const ISO_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const ISO_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Directional marks browsers and spreadsheets like to slip into dates.
fn is_invisible_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}' | '\u{061c}' | '\u{feff}'
    )
}

/// Drop bidi/zero-width marks, fold any unicode whitespace to a single
/// ASCII space and trim.
pub fn clean_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars().filter(|c| !is_invisible_mark(*c)) {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}

/// Parse `DD/MM/YYYY[ HH:MM[:SS]]` or ISO-8601 into a local naive
/// date-time at minute precision. A bare date means midnight. Offsets are
/// converted to the local timezone.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = clean_input(raw);
    if s.is_empty() {
        return None;
    }
    parse_cleaned(&s).map(truncate_to_minute)
}

fn parse_cleaned(s: &str) -> Option<NaiveDateTime> {

    for fmt in LOCAL_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, LOCAL_DATE_FORMAT) {
        return d.and_hms_opt(0, 0, 0);
    }

    parse_iso(s)
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ISO_OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
    }
    for fmt in ISO_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_local(dt: &NaiveDateTime) -> String {
    dt.format(LOCAL_FORMAT).to_string()
}

/// Re-format any accepted input as `DD/MM/YYYY HH:MM`; `None` when it
/// does not parse.
pub fn normalize(raw: &str) -> Option<String> {
    parse_local_datetime(raw).map(|dt| format_local(&dt))
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Current local time at minute precision.
pub fn now_minute() -> NaiveDateTime {
    truncate_to_minute(Local::now().naive_local())
}
