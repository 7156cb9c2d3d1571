//! Spreadsheet date serials
//!
//! Both container formats store dates as floating-point day counts plus a
//! number format that marks the cell as a date. This module converts between
//! those serials and [`NaiveDateTime`] and recognises date number formats.
//!
//! The 1900 date system keeps Lotus 1-2-3's phantom 1900-02-29 (serial 60),
//! so serials below 61 are offset by one day.

use chrono::{Duration, NaiveDate, NaiveDateTime};

const MS_PER_DAY: f64 = 86_400_000.0;

/// First serial after the phantom 1900-02-29
const LOTUS_LEAP_SERIAL: f64 = 61.0;

fn epoch(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Convert a date serial to a date/time, rounded to the millisecond
///
/// Returns `None` for negative or non-finite serials and for serials past
/// the range chrono can represent.
///
/// # Examples
/// ```
/// use sheetkit_core::date::serial_to_datetime;
///
/// let dt = serial_to_datetime(45306.5, false).unwrap();
/// assert_eq!(dt.to_string(), "2024-01-15 12:00:00");
/// ```
pub fn serial_to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let base = if date_1904 {
        epoch(1904, 1, 1)?
    } else if serial < LOTUS_LEAP_SERIAL {
        epoch(1899, 12, 31)?
    } else {
        epoch(1899, 12, 30)?
    };

    let ms = (serial * MS_PER_DAY).round();
    if ms > i64::MAX as f64 {
        return None;
    }
    base.checked_add_signed(Duration::milliseconds(ms as i64))
}

/// Convert a date/time to a date serial
pub fn datetime_to_serial(dt: NaiveDateTime, date_1904: bool) -> f64 {
    if date_1904 {
        return match epoch(1904, 1, 1) {
            Some(base) => millis_between(base, dt) / MS_PER_DAY,
            None => 0.0,
        };
    }

    let serial = match epoch(1899, 12, 30) {
        Some(base) => millis_between(base, dt) / MS_PER_DAY,
        None => 0.0,
    };
    if serial < LOTUS_LEAP_SERIAL {
        serial - 1.0
    } else {
        serial
    }
}

fn millis_between(base: NaiveDateTime, dt: NaiveDateTime) -> f64 {
    (dt - base).num_milliseconds() as f64
}

/// Check whether a built-in number format id is a date/time format
pub fn is_builtin_date_format(id: u32) -> bool {
    matches!(id, 14..=22 | 27..=36 | 45..=47 | 50..=58)
}

/// Check whether a number format code formats values as dates or times
///
/// Quoted literals, escaped characters, padding/fill directives and bracketed
/// colour or locale tokens are ignored; elapsed-time tokens such as `[h]`
/// count as time.
pub fn is_date_format(code: &str) -> bool {
    let mut chars = code.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                for q in chars.by_ref() {
                    if q == '"' {
                        break;
                    }
                }
            }
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                let mut token = String::new();
                for b in chars.by_ref() {
                    if b == ']' {
                        break;
                    }
                    token.push(b);
                }
                let token = token.to_ascii_lowercase();
                if !token.is_empty() && token.chars().all(|t| matches!(t, 'h' | 'm' | 's')) {
                    return true;
                }
            }
            _ => {
                if matches!(c.to_ascii_lowercase(), 'd' | 'm' | 'y' | 'h' | 's') {
                    return true;
                }
            }
        }
    }
    false
}
