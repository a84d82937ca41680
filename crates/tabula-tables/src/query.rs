//! Query engine
//!
//! Composes per-column filters, a global search over visible columns and a
//! single-key sort into one pure transformation. The result is a list of
//! positions into the loaded records; the records themselves are never
//! touched.

mod sort;

pub use sort::{SortDirection, SortState, compare_values};
pub(crate) use sort::fold_accents;

use crate::column::{ColumnKey, ColumnSet, SemanticType, VisibilityMap};
use crate::record::{Record, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Filter, search and sort inputs of one instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
	/// Filter text by column, stored lowercased
	pub column_filters: IndexMap<ColumnKey, String>,
	/// Global search text, stored lowercased
	pub global_search: String,
	/// Active sort
	pub sort: SortState,
}

impl QuerySpec {
	/// Sets the filter of a column; empty text clears it
	pub fn set_filter(&mut self, key: &str, text: &str) {
		let key = ColumnKey::normalize(key);
		if text.is_empty() {
			self.column_filters.shift_remove(&key);
		} else {
			self.column_filters.insert(key, text.to_lowercase());
		}
	}

	/// Returns the filter text of a column
	pub fn filter(&self, key: &str) -> Option<&str> {
		self.column_filters.get(key).map(String::as_str)
	}

	/// Removes every column filter
	pub fn clear_filters(&mut self) {
		self.column_filters.clear();
	}

	/// Sets the global search text; empty text clears it
	pub fn set_global_search(&mut self, text: &str) {
		self.global_search = text.to_lowercase();
	}

	/// Returns true when no filter, search or sort is active
	pub fn is_empty(&self) -> bool {
		self.column_filters.is_empty() && self.global_search.is_empty() && !self.sort.is_active()
	}
}

/// Runs filters, search and sort over `records`
///
/// Returns the positions of the matching records, in sorted order. Filters on
/// keys that name no column are ignored.
pub fn apply_query(
	records: &[Record],
	columns: &ColumnSet,
	visibility: &VisibilityMap,
	spec: &QuerySpec,
) -> Vec<usize> {
	let filters: Vec<_> = spec
		.column_filters
		.iter()
		.filter(|(_, text)| !text.is_empty())
		.filter_map(|(key, text)| columns.get(key.as_str()).map(|def| (def, text.as_str())))
		.collect();

	let searchable: Vec<_> = if spec.global_search.is_empty() {
		Vec::new()
	} else {
		columns.visible(visibility).map(|(_, def)| def).collect()
	};

	let mut positions: Vec<usize> = records
		.iter()
		.enumerate()
		.filter(|(_, record)| {
			filters
				.iter()
				.all(|(def, text)| contains_text(record.get(&def.key), text, def.semantic))
		})
		.filter(|(_, record)| {
			spec.global_search.is_empty()
				|| searchable.iter().any(|def| {
					contains_text(record.get(&def.key), &spec.global_search, def.semantic)
				})
		})
		.map(|(position, _)| position)
		.collect();

	if let Some((key, direction)) = spec.sort.active() {
		if let Some(def) = columns.get(key.as_str()) {
			positions.sort_by(|&a, &b| {
				let ordering = compare_values(
					records[a].get(&def.key),
					records[b].get(&def.key),
					def.semantic,
				);
				direction.apply(ordering)
			});
		}
	}

	tracing::debug!(
		total = records.len(),
		matched = positions.len(),
		"query applied"
	);
	positions
}

/// Case-insensitive containment test used by filters and search
///
/// Blank values never match. Phone numbers are compared with whitespace
/// removed on both sides. `needle` must already be lowercased.
pub fn contains_text(value: Option<&Value>, needle: &str, semantic: SemanticType) -> bool {
	let Some(value) = value.filter(|v| !v.is_blank()) else {
		return false;
	};
	let haystack = value.to_text().to_lowercase();
	if semantic == SemanticType::PhoneNumber {
		strip_whitespace(&haystack).contains(&strip_whitespace(needle))
	} else {
		haystack.contains(needle)
	}
}

pub(crate) fn strip_whitespace(text: &str) -> String {
	text.chars().filter(|c| !c.is_whitespace()).collect()
}
