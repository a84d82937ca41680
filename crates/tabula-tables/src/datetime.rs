//! Best-effort date parsing shared by sorting and cell shaping

use crate::record::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%d %H:%M",
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%dT%H:%M",
	"%d/%m/%Y %H:%M:%S",
	"%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Display format for date-time cells
pub(crate) const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parses a cell value as a local date-time
///
/// Integers are epoch milliseconds. Text is tried as RFC 3339 first (keeping
/// the wall-clock time of its offset), then against the known layouts.
pub(crate) fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
	match value {
		Value::Integer(millis) => DateTime::from_timestamp_millis(*millis).map(|dt| dt.naive_utc()),
		Value::Text(text) => parse_text(text.trim()),
		_ => None,
	}
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
	if text.is_empty() {
		return None;
	}
	if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
		return Some(dt.naive_local());
	}
	DATETIME_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
		.or_else(|| {
			DATE_FORMATS
				.iter()
				.find_map(|format| NaiveDate::parse_from_str(text, format).ok())
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}
