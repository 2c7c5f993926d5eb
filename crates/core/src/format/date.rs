//! Timestamp parsing and the two calendar display formats
//!
//! Records are dated with RFC 3339 strings. Display shows the Gregorian
//! date alongside the Solar Hijri (Jalali) date; both formatters fail
//! soft to "-" instead of erroring on bad input.

use chrono::{DateTime, Datelike, Local, Utc};

/// Lenient RFC 3339 parse. Returns None for empty or malformed input.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if ts.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Gregorian DD/MM/YYYY in local time, or "-" for invalid input.
pub fn format_primary_date(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => dt.with_timezone(&Local).format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Solar Hijri YYYY/MM/DD derived from the local calendar date,
/// or "-" for invalid input.
pub fn format_secondary_date(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => {
            let local = dt.with_timezone(&Local);
            let (jy, jm, jd) =
                jalali_from_gregorian(local.year(), local.month() as i32, local.day() as i32);
            format!("{:04}/{:02}/{:02}", jy, jm, jd)
        }
        None => "-".to_string(),
    }
}

/// Local year-month-day key used for date grouping and the same-day
/// duplicate check. Empty string for invalid input.
pub fn date_key(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => {
            let local = dt.with_timezone(&Local);
            format!("{}-{}-{}", local.year(), local.month(), local.day())
        }
        None => String::new(),
    }
}

/// Civil Gregorian to Jalali conversion (valid for the modern range).
fn jalali_from_gregorian(gy: i32, gm: i32, gd: i32) -> (i32, i32, i32) {
    const G_DAYS_IN_MONTH: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let (mut jy, gy_off) = if gy > 1600 {
        (979, gy - 1600)
    } else {
        (0, gy - 621)
    };
    let gy2 = if gm > 2 { gy_off + 1 } else { gy_off };
    let mut days = 365 * gy_off + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400 - 80
        + gd
        + G_DAYS_IN_MONTH[(gm - 1) as usize];

    jy += 33 * (days / 12053);
    days %= 12053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };
    (jy, jm, jd)
}
