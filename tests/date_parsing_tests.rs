use chrono::{NaiveDate, NaiveDateTime};
use hwcontrol::utils::date::{clean_input, normalize, parse_local_datetime, truncate_to_minute};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn local_formats() {
    assert_eq!(parse_local_datetime("05/06/2025 14:30"), Some(at(2025, 6, 5, 14, 30)));
    assert_eq!(parse_local_datetime("05/06/2025 14:30:59"), Some(at(2025, 6, 5, 14, 30)));
}

#[test]
fn parsed_values_are_minute_precision() {
    assert_eq!(parse_local_datetime("2025-06-05T14:30:45.250"), Some(at(2025, 6, 5, 14, 30)));
    assert_eq!(parse_local_datetime("2025-06-05 14:30:59"), Some(at(2025, 6, 5, 14, 30)));
}

#[test]
fn bare_date_means_midnight() {
    assert_eq!(parse_local_datetime("05/06/2025"), Some(at(2025, 6, 5, 0, 0)));
    assert_eq!(parse_local_datetime("2025-06-05"), Some(at(2025, 6, 5, 0, 0)));
}

#[test]
fn iso_fallback_without_offset() {
    assert_eq!(parse_local_datetime("2025-06-05T14:30"), Some(at(2025, 6, 5, 14, 30)));
    assert_eq!(parse_local_datetime("2025-06-05 14:30:00"), Some(at(2025, 6, 5, 14, 30)));
}

#[test]
fn iso_with_offset_is_accepted() {
    assert!(parse_local_datetime("2025-06-05T14:30:00-03:00").is_some());
    assert!(parse_local_datetime("2025-06-05T17:30:00Z").is_some());
}

#[test]
fn invisible_marks_and_odd_whitespace_are_ignored() {
    let raw = "\u{200e}05/06/2025\u{00a0}\u{00a0}14:30\u{202c} ";
    assert_eq!(clean_input(raw), "05/06/2025 14:30");
    assert_eq!(parse_local_datetime(raw), Some(at(2025, 6, 5, 14, 30)));
}

#[test]
fn garbage_yields_none() {
    for raw in ["", "   ", "not-a-date", "32/01/2025 10:00", "05/06/2025 25:00"] {
        assert_eq!(parse_local_datetime(raw), None, "{raw:?}");
    }
}

#[test]
fn normalize_reformats_to_local() {
    assert_eq!(normalize("2025-06-05T14:30:45").as_deref(), Some("05/06/2025 14:30"));
    assert_eq!(normalize("nope"), None);
}

#[test]
fn truncation_drops_seconds() {
    let dt = at(2025, 6, 5, 14, 30) + chrono::Duration::milliseconds(59_500);
    assert_eq!(truncate_to_minute(dt), at(2025, 6, 5, 14, 30));
}
