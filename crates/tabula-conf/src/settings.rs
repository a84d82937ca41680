//! Grid settings
//!
//! [`GridOptions`] is the configuration snapshot of one grid instance. It can
//! be built in code with the `with_*` methods or deserialized from a TOML or
//! JSON document whose keys follow the camelCase names hosts already use
//! (`containerId`, `itemsPerPageCount`, `badgeColumns`, ...).

mod logging;
mod options;
mod theme;

pub use logging::{LogFormat, LoggingSettings};
pub use options::GridOptions;
pub use theme::{Palette, Theme, hover_class};

use thiserror::Error;

/// Errors raised while loading or validating settings
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings file could not be read
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The settings file is not valid TOML
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The settings document is not valid JSON
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// A required option is missing or empty
	#[error("Missing required field: {0}")]
	MissingRequired(String),

	/// An option holds a value outside its domain
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue {
		/// Option name, camelCase
		key: String,
		/// What is wrong with the value
		message: String,
	},

	/// The settings file extension is neither `.toml` nor `.json`
	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

/// Result alias for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
