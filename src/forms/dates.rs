//! Date and time handling at the form boundary.
//!
//! Payloads carry `NaiveDate`, which serializes as `yyyy-MM-dd`. Forms show
//! `dd/MM/yyyy` but also accept the wire format as typed input.

use chrono::{NaiveDate, NaiveTime};

pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";
pub const WIRE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a form date in either `dd/MM/yyyy` or `yyyy-MM-dd`.
///
/// The shape is checked before chrono sees the input, so unpadded values
/// like `1/2/2000` are rejected.
pub fn parse_form_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if has_shape(input, &[2, 5], b'/') {
        NaiveDate::parse_from_str(input, DISPLAY_FORMAT).ok()
    } else if has_shape(input, &[4, 7], b'-') {
        NaiveDate::parse_from_str(input, WIRE_FORMAT).ok()
    } else {
        None
    }
}

/// Parses a 24 hour `HH:mm` time.
pub fn parse_form_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    if has_shape(input, &[2], b':') {
        NaiveTime::parse_from_str(input, TIME_FORMAT).ok()
    } else {
        None
    }
}

pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn time_to_display(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn has_shape(input: &str, separators: &[usize], separator: u8) -> bool {
    let bytes = input.as_bytes();
    let expected_len = if separators.len() == 1 { 5 } else { 10 };
    bytes.len() == expected_len
        && bytes.iter().enumerate().all(|(i, b)| {
            if separators.contains(&i) {
                *b == separator
            } else {
                b.is_ascii_digit()
            }
        })
}
