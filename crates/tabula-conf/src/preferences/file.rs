//! File-backed preference store

use super::{PreferenceError, PreferenceStore, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Preference store writing one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
	dir: PathBuf,
}

impl FileStore {
	/// Opens a store rooted at `dir`, creating the directory when needed
	pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
		let dir = dir.into();
		std::fs::create_dir_all(&dir)?;
		Ok(Self { dir })
	}

	/// Directory holding the files
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, key: &str) -> Result<PathBuf> {
		let valid = !key.is_empty()
			&& key != "."
			&& key != ".."
			&& key
				.chars()
				.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
		if !valid {
			return Err(PreferenceError::InvalidKey(key.to_string()));
		}
		Ok(self.dir.join(format!("{key}.json")))
	}
}

impl PreferenceStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>> {
		match std::fs::read_to_string(self.path_for(key)?) {
			Ok(contents) => Ok(Some(contents)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	fn set(&self, key: &str, value: String) -> Result<()> {
		std::fs::write(self.path_for(key)?, value)?;
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<()> {
		match std::fs::remove_file(self.path_for(key)?) {
			Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
			_ => Ok(()),
		}
	}
}
