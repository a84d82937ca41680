//! Record model
//!
//! A [`Record`] is an ordered mapping from field name to a scalar [`Value`].
//! Field order is the order of the source object and is significant: the first
//! record of a batch is the schema sample for column inference, and the first
//! field is the fallback identifier of a row.

use crate::error::{Result, TableError, json_kind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Null or absent
	#[default]
	Null,
	/// Boolean
	Bool(bool),
	/// Integral number
	Integer(i64),
	/// Floating point number
	Float(f64),
	/// Text
	Text(String),
}

impl Value {
	/// Converts a scalar JSON value
	///
	/// # Errors
	///
	/// Returns [`TableError::NestedValue`] for arrays and objects.
	pub fn from_json(field: &str, value: &serde_json::Value) -> Result<Self> {
		match value {
			serde_json::Value::Null => Ok(Value::Null),
			serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
			serde_json::Value::Number(n) => Ok(match n.as_i64() {
				Some(i) => Value::Integer(i),
				None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
			}),
			serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
			other => Err(TableError::NestedValue {
				field: field.to_string(),
				found: json_kind(other),
			}),
		}
	}

	/// Returns true for null and empty text
	///
	/// Blank values never satisfy a column filter or the global search.
	pub fn is_blank(&self) -> bool {
		match self {
			Value::Null => true,
			Value::Text(s) => s.is_empty(),
			_ => false,
		}
	}

	/// Returns true for non-blank values other than `false`, zero and NaN
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Integer(i) => *i != 0,
			Value::Float(f) => *f != 0.0 && !f.is_nan(),
			Value::Text(s) => !s.is_empty(),
		}
	}

	/// Returns the string coercion used by filters, sort and export
	///
	/// Null coerces to the empty string.
	pub fn to_text(&self) -> String {
		self.to_string()
	}

	/// Compares the string coercion of this value with `other`
	pub fn loosely_equals(&self, other: &str) -> bool {
		match self {
			Value::Null => false,
			Value::Text(s) => s == other,
			_ => self.to_text() == other,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => Ok(()),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Integer(i) => write!(f, "{}", i),
			Value::Float(x) => write!(f, "{}", x),
			Value::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Text(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Null)
	}
}

/// An ordered mapping from field name to value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
	/// Creates an empty record
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Adds a field, builder style
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::record::{Record, Value};
	///
	/// let record = Record::new().with("Indice", 1).with("Statut", "Rdv");
	/// assert_eq!(record.get("Statut"), Some(&Value::from("Rdv")));
	/// ```
	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(field, value);
		self
	}

	/// Sets a field, keeping its position when it already exists
	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(field.into(), value.into());
	}

	/// Returns the value of a field
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Field names in source order
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Fields in source order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Number of fields
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the record has no field
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Name of the identifying field
	///
	/// The first field whose name contains `indice` (case-insensitive), else
	/// the first field.
	pub fn identifier_field(&self) -> Option<&str> {
		self.field_names()
			.find(|name| name.to_lowercase().contains("indice"))
			.or_else(|| self.field_names().next())
	}

	/// Value of the identifying field
	pub fn identifier(&self) -> Option<&Value> {
		self.identifier_field().and_then(|field| self.get(field))
	}

	/// First truthy value of a field whose name contains `tel`
	pub fn first_phone_value(&self) -> Option<&Value> {
		self.iter()
			.find(|(name, value)| name.to_lowercase().contains("tel") && value.is_truthy())
			.map(|(_, value)| value)
	}

	/// Converts a JSON object
	///
	/// # Errors
	///
	/// Returns [`TableError::NotARecord`] when `value` is not an object and
	/// [`TableError::NestedValue`] when a field is not scalar.
	pub fn from_json(value: &serde_json::Value) -> Result<Self> {
		Self::from_json_at(0, value)
	}

	fn from_json_at(index: usize, value: &serde_json::Value) -> Result<Self> {
		let object = value.as_object().ok_or(TableError::NotARecord {
			index,
			found: json_kind(value),
		})?;
		let mut fields = IndexMap::with_capacity(object.len());
		for (field, value) in object {
			fields.insert(field.clone(), Value::from_json(field, value)?);
		}
		Ok(Self(fields))
	}

	/// Converts a JSON array of objects
	///
	/// # Errors
	///
	/// Returns [`TableError::NotACollection`] when `value` is not an array, or
	/// the first per-record error.
	pub fn batch_from_json(value: &serde_json::Value) -> Result<Vec<Self>> {
		let items = value
			.as_array()
			.ok_or(TableError::NotACollection(json_kind(value)))?;
		items
			.iter()
			.enumerate()
			.map(|(index, item)| Self::from_json_at(index, item))
			.collect()
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}
