//! Error types for the table engine

use thiserror::Error;

/// Errors raised while loading records or addressing columns
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
	/// The data handed to a loader is not a collection of records
	#[error("Expected an array of records, got {0}")]
	NotACollection(&'static str),

	/// One element of a batch is not a record
	#[error("Record {index} is not an object (got {found})")]
	NotARecord {
		/// Position of the element in the batch
		index: usize,
		/// JSON kind that was found instead
		found: &'static str,
	},

	/// A record field holds a nested array or object
	#[error("Field '{field}' holds a nested {found}, only scalar values are supported")]
	NestedValue {
		/// Field name
		field: String,
		/// JSON kind that was found
		found: &'static str,
	},

	/// A normalized column key does not name a known column
	#[error("Unknown column: {0}")]
	UnknownColumn(String),
}

/// Result alias for table operations
pub type Result<T> = std::result::Result<T, TableError>;

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}
