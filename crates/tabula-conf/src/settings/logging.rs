//! Logging settings
//!
//! The grid crates only emit `tracing` events. A host that installs a
//! subscriber can read its level and format from here.

use super::{Result, SettingsError};
use serde::{Deserialize, Serialize};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Crates whose events the filter directive covers
const TARGETS: &[&str] = &["tabula", "tabula_tables", "tabula_grid", "tabula_conf"];

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	/// Human-readable lines
	#[default]
	Text,
	/// One JSON object per line
	Json,
}

/// Logging configuration for hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Maximum level, one of `trace`, `debug`, `info`, `warn`, `error`, `off`
	pub level: String,
	/// Line format
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Text,
		}
	}
}

impl LoggingSettings {
	/// Checks the level name
	pub fn validate(&self) -> Result<()> {
		if LEVELS.contains(&self.level.to_lowercase().as_str()) {
			Ok(())
		} else {
			Err(SettingsError::InvalidValue {
				key: "logging.level".to_string(),
				message: format!("expected one of {}, got '{}'", LEVELS.join(", "), self.level),
			})
		}
	}

	/// Filter directive for the grid crates, e.g. `tabula=info,tabula_tables=info,...`
	pub fn directive(&self) -> String {
		let level = self.level.to_lowercase();
		TARGETS
			.iter()
			.map(|target| format!("{target}={level}"))
			.collect::<Vec<_>>()
			.join(",")
	}
}
