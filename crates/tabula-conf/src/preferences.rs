//! Persisted per-instance preferences
//!
//! Each grid instance keeps its column visibility and page size under the key
//! `table_settings_<containerId>` as a JSON document:
//!
//! ```json
//! { "visibleColumns": { "indice": true, "agent": false }, "itemsPerPage": 25 }
//! ```
//!
//! Stores are string-keyed, string-valued, last write wins. Two stores ship
//! with the crate: [`MemoryStore`] and [`FileStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by preference stores
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PreferenceError {
	/// The backing storage failed
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A stored document is not valid JSON for [`PersistedSettings`]
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// The key cannot be stored by this backend
	#[error("Invalid preference key: {0}")]
	InvalidKey(String),
}

/// Result alias for preference operations
pub type Result<T> = std::result::Result<T, PreferenceError>;

/// Storage key of an instance's preferences
///
/// # Examples
///
/// ```
/// assert_eq!(tabula_conf::settings_key("calls"), "table_settings_calls");
/// ```
pub fn settings_key(container_id: &str) -> String {
	format!("table_settings_{container_id}")
}

/// Preferences remembered for one instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSettings {
	/// Normalized column key to visibility
	pub visible_columns: IndexMap<String, bool>,
	/// Page size, when one was chosen
	#[serde(skip_serializing_if = "Option::is_none")]
	pub items_per_page: Option<usize>,
}

/// Key-value storage for instance preferences
pub trait PreferenceStore: Send + Sync {
	/// Raw value stored under `key`
	fn get(&self, key: &str) -> Result<Option<String>>;

	/// Replaces the value stored under `key`
	fn set(&self, key: &str, value: String) -> Result<()>;

	/// Removes the value stored under `key`
	fn remove(&self, key: &str) -> Result<()>;

	/// Loads and parses the preferences of an instance
	fn load_settings(&self, container_id: &str) -> Result<Option<PersistedSettings>> {
		self.get(&settings_key(container_id))?
			.map(|raw| serde_json::from_str(&raw).map_err(PreferenceError::from))
			.transpose()
	}

	/// Serializes and stores the preferences of an instance
	fn save_settings(&self, container_id: &str, settings: &PersistedSettings) -> Result<()> {
		let raw = serde_json::to_string(settings)?;
		self.set(&settings_key(container_id), raw)
	}
}
