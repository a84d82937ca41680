//! Semantic column types

use crate::record::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PHONE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:\+|00)?\d(?:[\s.\-]?\d){8,14}$").expect("PHONE_SHAPE: invalid regex pattern")
});

/// How a column's values are compared, filtered and shaped
///
/// Assigned once when columns are inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
	/// Record identifier, sorted numerically
	Identifier,
	/// Telephone number, whitespace-insensitive
	PhoneNumber,
	/// Date and time, sorted chronologically and shown as `DD/MM/YYYY HH:mm`
	DateTime,
	/// Priority, sorted numerically
	Priority,
	/// Anything else
	#[default]
	Text,
}

impl SemanticType {
	/// Tags a column from its field name
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::column::SemanticType;
	///
	/// assert_eq!(SemanticType::from_field_name("INDICE"), SemanticType::Identifier);
	/// assert_eq!(SemanticType::from_field_name("Tel port"), SemanticType::PhoneNumber);
	/// assert_eq!(SemanticType::from_field_name("Agent"), SemanticType::Text);
	/// ```
	pub fn from_field_name(name: &str) -> Self {
		let name = name.to_lowercase();
		if name.contains("indice") {
			SemanticType::Identifier
		} else if name.contains("priorite") || name.contains("priorité") {
			SemanticType::Priority
		} else if name.contains("tel") {
			SemanticType::PhoneNumber
		} else if name.contains("date") || name.contains("appel") {
			SemanticType::DateTime
		} else {
			SemanticType::Text
		}
	}

	/// Tags a column from its field name and, optionally, a sample value
	///
	/// With `detect_phone_by_value`, a column that would be `Text` becomes
	/// `PhoneNumber` when the sample looks like a phone number.
	pub fn sniff(name: &str, sample: Option<&Value>, detect_phone_by_value: bool) -> Self {
		let by_name = Self::from_field_name(name);
		if by_name != SemanticType::Text || !detect_phone_by_value {
			return by_name;
		}
		match sample {
			Some(Value::Text(text)) if looks_like_phone(text) => SemanticType::PhoneNumber,
			_ => SemanticType::Text,
		}
	}

	/// Returns true for types sorted by numeric value
	pub fn is_numeric(self) -> bool {
		matches!(self, SemanticType::Identifier | SemanticType::Priority)
	}
}

/// Returns true when `text` has the shape of a phone number
///
/// 9 to 15 digits, optionally prefixed by `+` or `00`, with single spaces,
/// dots or hyphens between digits.
pub fn looks_like_phone(text: &str) -> bool {
	PHONE_SHAPE.is_match(text.trim())
}
