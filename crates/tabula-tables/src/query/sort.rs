//! Sort state and value comparators

use crate::column::{ColumnKey, SemanticType};
use crate::datetime::parse_datetime;
use crate::record::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
		.expect("LEADING_FLOAT: invalid regex pattern")
});

/// Sort direction of the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending
	Asc,
	/// Descending
	Desc,
}

impl SortDirection {
	/// Orients an ascending comparison
	pub fn apply(self, ordering: Ordering) -> Ordering {
		match self {
			SortDirection::Asc => ordering,
			SortDirection::Desc => ordering.reverse(),
		}
	}
}

/// Single-key sort state
///
/// At most one column carries a direction; every other column is unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
	active: Option<(ColumnKey, SortDirection)>,
}

impl SortState {
	/// Advances the cycle of `key` and clears every other column
	///
	/// The cycle is unsorted, ascending, descending, unsorted.
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::column::ColumnKey;
	/// use tabula_tables::query::{SortDirection, SortState};
	///
	/// let key = ColumnKey::normalize("Indice");
	/// let mut sort = SortState::default();
	/// assert_eq!(sort.toggle(&key), Some(SortDirection::Asc));
	/// assert_eq!(sort.toggle(&key), Some(SortDirection::Desc));
	/// assert_eq!(sort.toggle(&key), None);
	/// ```
	pub fn toggle(&mut self, key: &ColumnKey) -> Option<SortDirection> {
		let next = match self.direction_of(key.as_str()) {
			None => Some(SortDirection::Asc),
			Some(SortDirection::Asc) => Some(SortDirection::Desc),
			Some(SortDirection::Desc) => None,
		};
		self.active = next.map(|direction| (key.clone(), direction));
		next
	}

	/// Direction of `key`, if it is the sorted column
	pub fn direction_of(&self, key: &str) -> Option<SortDirection> {
		self.active
			.as_ref()
			.filter(|(active, _)| active.as_str() == key)
			.map(|(_, direction)| *direction)
	}

	/// The sorted column and its direction
	pub fn active(&self) -> Option<(&ColumnKey, SortDirection)> {
		self.active.as_ref().map(|(key, direction)| (key, *direction))
	}

	/// Returns true when a column is sorted
	pub fn is_active(&self) -> bool {
		self.active.is_some()
	}

	/// Clears the sort
	pub fn clear(&mut self) {
		self.active = None;
	}
}

/// Ascending comparison of two cell values
///
/// Numeric columns compare the leading number of each value (0 when there is
/// none). Date columns compare chronologically when both sides parse and fall
/// back to text otherwise. Text compares lowercased with accents folded, then
/// with accents kept to break ties.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, semantic: SemanticType) -> Ordering {
	if semantic.is_numeric() {
		return leading_number(a).total_cmp(&leading_number(b));
	}
	if semantic == SemanticType::DateTime {
		if let (Some(a), Some(b)) = (a.and_then(parse_datetime), b.and_then(parse_datetime)) {
			return a.cmp(&b);
		}
	}
	compare_text(a, b)
}

fn leading_number(value: Option<&Value>) -> f64 {
	let number = match value {
		Some(Value::Integer(i)) => *i as f64,
		Some(Value::Float(f)) => *f,
		Some(Value::Text(text)) => LEADING_FLOAT
			.find(text)
			.and_then(|m| m.as_str().trim().parse::<f64>().ok())
			.unwrap_or(0.0),
		_ => 0.0,
	};
	if number.is_nan() { 0.0 } else { number }
}

fn compare_text(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	let a = a.map(Value::to_text).unwrap_or_default().to_lowercase();
	let b = b.map(Value::to_text).unwrap_or_default().to_lowercase();
	fold_accents(&a)
		.cmp(&fold_accents(&b))
		.then_with(|| a.cmp(&b))
}

/// Strips the diacritics of common Latin letters
pub(crate) fn fold_accents(text: &str) -> String {
	text.chars()
		.map(|c| match c {
			'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
			'ç' => 'c',
			'è' | 'é' | 'ê' | 'ë' => 'e',
			'ì' | 'í' | 'î' | 'ï' => 'i',
			'ñ' => 'n',
			'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
			'ù' | 'ú' | 'û' | 'ü' => 'u',
			'ý' | 'ÿ' => 'y',
			other => other,
		})
		.collect()
}
