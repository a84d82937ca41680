//! In-memory preference store

use super::{PreferenceStore, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Preference store kept in process memory
///
/// Clones share the same entries, so a host can keep a handle while the
/// registry owns another.
///
/// # Examples
///
/// ```
/// use tabula_conf::{MemoryStore, PersistedSettings, PreferenceStore};
///
/// let store = MemoryStore::new();
/// let settings = PersistedSettings { items_per_page: Some(25), ..Default::default() };
/// store.save_settings("calls", &settings).unwrap();
///
/// assert_eq!(store.load_settings("calls").unwrap(), Some(settings));
/// assert_eq!(store.load_settings("other").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
	/// Creates an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored entries
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Whether the store is empty
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl PreferenceStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(self.entries.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: String) -> Result<()> {
		self.entries.write().insert(key.to_string(), value);
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.entries.write().remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_last_write_wins() {
		let store = MemoryStore::new();

		store.set("k", "1".to_string()).unwrap();
		store.set("k", "2".to_string()).unwrap();

		assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
		assert_eq!(store.len(), 1);
	}

	#[rstest]
	fn test_clones_share_entries() {
		let store = MemoryStore::new();
		let handle = store.clone();

		store.set("k", "v".to_string()).unwrap();
		handle.remove("k").unwrap();

		assert!(store.is_empty());
	}
}
