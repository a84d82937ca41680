//! Column definitions, visibility and inference
//!
//! Columns are keyed by a [`ColumnKey`], the normalized form of the source
//! field name. A [`ColumnSet`] keeps insertion order, which is the order
//! produced by inference; render passes reorder it with
//! [`ColumnSet::ordered`].

mod inference;
mod key;
mod semantic;

pub use inference::{ColumnSpecifier, InferenceConfig, infer_columns};
pub use key::ColumnKey;
pub use semantic::{SemanticType, looks_like_phone};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Definition of one grid column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
	/// Original field name in the records
	pub key: String,
	/// Display label
	pub label: String,
	/// Semantic type assigned at inference time
	pub semantic: SemanticType,
	/// Whether cells render as status badges
	pub badge: bool,
	/// Alias given in an `"source as alias"` specifier
	pub alias: Option<String>,
	/// The specifier this column was resolved from
	pub requested: Option<String>,
}

impl ColumnDef {
	/// Creates a text column whose label is derived from the field name
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::column::{ColumnDef, SemanticType};
	///
	/// let column = ColumnDef::new("date_appel");
	/// assert_eq!(column.label, "DATE APPEL");
	/// assert_eq!(column.semantic, SemanticType::DateTime);
	/// ```
	pub fn new(key: impl Into<String>) -> Self {
		let key = key.into();
		Self {
			label: display_label(&key),
			semantic: SemanticType::from_field_name(&key),
			key,
			badge: false,
			alias: None,
			requested: None,
		}
	}

	/// Overrides the label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	/// Overrides the semantic type
	pub fn with_semantic(mut self, semantic: SemanticType) -> Self {
		self.semantic = semantic;
		self
	}

	/// Marks the column as badge-eligible
	pub fn with_badge(mut self, badge: bool) -> Self {
		self.badge = badge;
		self
	}
}

/// Turns a field name or alias into a display label
///
/// Underscores and hyphens become spaces and the result is uppercased.
pub fn display_label(name: &str) -> String {
	name.replace(['_', '-'], " ").to_uppercase()
}

/// Ordered column definitions keyed by normalized key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet(IndexMap<ColumnKey, ColumnDef>);

impl ColumnSet {
	/// Creates an empty set
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a definition
	///
	/// An existing key is overwritten in place: last write wins, the first
	/// position is kept.
	pub fn insert(&mut self, key: ColumnKey, def: ColumnDef) -> Option<ColumnDef> {
		self.0.insert(key, def)
	}

	/// Returns the definition for a normalized key
	pub fn get(&self, key: &str) -> Option<&ColumnDef> {
		self.0.get(key)
	}

	/// Returns true if the key names a column
	pub fn contains(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Number of columns
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if there is no column
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Columns in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, &ColumnDef)> {
		self.0.iter()
	}

	/// Keys in insertion order
	pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
		self.0.keys()
	}

	/// Columns in display order
	///
	/// Keys containing `indice` come first; the relative order inside each
	/// group is the insertion order.
	pub fn ordered(&self) -> Vec<(&ColumnKey, &ColumnDef)> {
		let mut columns: Vec<_> = self.0.iter().collect();
		columns.sort_by_key(|(key, _)| !key.is_identifier_key());
		columns
	}

	/// Columns in display order, visible only
	pub fn ordered_visible<'a>(
		&'a self,
		visibility: &VisibilityMap,
	) -> Vec<(&'a ColumnKey, &'a ColumnDef)> {
		self.ordered()
			.into_iter()
			.filter(|(key, _)| visibility.is_visible(key.as_str()))
			.collect()
	}

	/// Columns in insertion order, visible only
	pub fn visible<'a, 'v>(
		&'a self,
		visibility: &'v VisibilityMap,
	) -> impl Iterator<Item = (&'a ColumnKey, &'a ColumnDef)> + use<'a, 'v> {
		self.0
			.iter()
			.filter(move |(key, _)| visibility.is_visible(key.as_str()))
	}
}

/// Column visibility by normalized key
///
/// Keys that are absent are visible. Keys that do not name a column are kept
/// but have no effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap(IndexMap<ColumnKey, bool>);

impl VisibilityMap {
	/// Creates an empty map
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns false only when the key is explicitly hidden
	pub fn is_visible(&self, key: &str) -> bool {
		self.0.get(key).copied() != Some(false)
	}

	/// Sets the visibility of a key
	pub fn set(&mut self, key: ColumnKey, visible: bool) {
		self.0.insert(key, visible);
	}

	/// Flips the visibility of a key and returns the new value
	pub fn toggle(&mut self, key: &ColumnKey) -> bool {
		let visible = !self.is_visible(key.as_str());
		self.0.insert(key.clone(), visible);
		visible
	}

	/// Makes every column of `columns` visible
	pub fn show_all(&mut self, columns: &ColumnSet) {
		for key in columns.keys() {
			self.0.insert(key.clone(), true);
		}
	}

	/// Overlays stored preferences, field by field
	///
	/// Only keys already present in this map are taken from `stored`.
	pub fn merge_from<'a, I>(&mut self, stored: I)
	where
		I: IntoIterator<Item = (&'a str, bool)>,
	{
		for (key, visible) in stored {
			if let Some(slot) = self.0.get_mut(key) {
				*slot = visible;
			}
		}
	}

	/// Returns true when every column of `columns` is visible
	pub fn all_visible(&self, columns: &ColumnSet) -> bool {
		columns.keys().all(|key| self.is_visible(key.as_str()))
	}

	/// Entries in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, bool)> {
		self.0.iter().map(|(k, v)| (k, *v))
	}
}
