//! Normalized column keys

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN: invalid regex pattern"));
static HYPHEN_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"-+").expect("HYPHEN_RUN: invalid regex pattern"));

/// Normalized form of a field name
///
/// Lowercased, with each run of whitespace and each run of hyphens replaced
/// by a single underscore. Two field names that normalize to the same key
/// address the same column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
	/// Normalizes a field name
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::column::ColumnKey;
	///
	/// assert_eq!(ColumnKey::normalize("Date  Appel").as_str(), "date_appel");
	/// assert_eq!(ColumnKey::normalize("Nom--Client").as_str(), "nom_client");
	/// ```
	pub fn normalize(name: &str) -> Self {
		let lowered = name.to_lowercase();
		let spaced = WHITESPACE_RUN.replace_all(&lowered, "_");
		Self(HYPHEN_RUN.replace_all(&spaced, "_").into_owned())
	}

	/// Wraps a string that is already normalized
	pub fn from_normalized(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Returns the key as a string slice
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true for keys of identifying columns
	pub fn is_identifier_key(&self) -> bool {
		self.0.contains("indice")
	}
}

impl Borrow<str> for ColumnKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for ColumnKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ColumnKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
