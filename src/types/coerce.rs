use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M"
];

/// Coerces a date-like string into a calendar date, dropping any time of day.
pub fn coerce_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS.iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok()) {
        return Some(date);
    }

    if let Some(date_time) = DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok()) {
        return Some(date_time.date());
    }

    DateTime::parse_from_rfc3339(value).ok().map(|date_time| date_time.date_naive())
}

/// Coerces a numeric-like string into a decimal, accepting scientific notation.
pub fn coerce_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    Decimal::from_str(value).ok()
        .or_else(|| Decimal::from_scientific(value).ok())
}
