//! Per-instance grid options

use super::logging::LoggingSettings;
use super::theme::{Palette, Theme};
use super::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabula_tables::InferenceConfig;

/// Default number of rows above which a virtualized grid windows its rows
pub const DEFAULT_VIRTUALIZE_THRESHOLD: usize = 1000;

fn default_badge_columns() -> Vec<String> {
	vec!["Statut".to_string()]
}

/// Configuration snapshot of one grid instance
///
/// Feature toggles default to enabled; `virtualize` and
/// `detectPhoneByValue` default to disabled.
///
/// # Examples
///
/// ```
/// use tabula_conf::settings::GridOptions;
///
/// let options = GridOptions::from_json_str(
///     r#"{"containerId": "calls", "itemsPerPageCount": 25, "badgeCounts": ["Etat"]}"#,
/// )
/// .unwrap();
///
/// assert_eq!(options.container_id, "calls");
/// assert_eq!(options.items_per_page_count, Some(25));
/// assert_eq!(options.badge_columns, vec!["Etat".to_string()]);
/// assert!(options.enable_search);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
	/// Identifier of the host container; names the instance
	pub container_id: String,

	/// Initial records, a JSON array of objects
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,

	/// Ordered column specifiers, `"field"` or `"field as Alias"`
	pub included_columns: Vec<String>,

	/// Fields to leave out when no columns are included explicitly
	pub excluded_columns: Vec<String>,

	/// Initial page size
	#[serde(skip_serializing_if = "Option::is_none")]
	pub items_per_page_count: Option<usize>,

	/// Columns rendered as status badges
	#[serde(alias = "badgeCounts", default = "default_badge_columns")]
	pub badge_columns: Vec<String>,

	/// Allow sorting by clicking header columns
	pub order_by_columns: bool,

	/// Allow the global search box
	pub enable_search: bool,

	/// Allow per-column filters
	pub enable_filters: bool,

	/// Allow toggling column visibility
	pub enable_column_toggle: bool,

	/// Attach tooltip hints to long cell text
	pub enable_tooltip: bool,

	/// Allow changing the page size
	pub enable_page_size_selector: bool,

	/// Enable the action button bound to the selected row
	pub enable_action_button: bool,

	/// Window rows when the filtered set is large
	pub virtualize: bool,

	/// Filtered row count above which rows are windowed
	pub virtualize_threshold: usize,

	/// Named color theme
	pub theme: Theme,

	/// Custom `[header background, accent]` classes; overrides the theme
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_palette: Option<Vec<String>>,

	/// Expose legacy element identifiers and the shared current-record slot
	pub legacy_shim: bool,

	/// Tag text columns whose sample value looks like a phone number
	pub detect_phone_by_value: bool,

	/// Logging settings for hosts
	pub logging: LoggingSettings,
}

impl Default for GridOptions {
	fn default() -> Self {
		Self {
			container_id: String::new(),
			data: None,
			included_columns: Vec::new(),
			excluded_columns: Vec::new(),
			items_per_page_count: None,
			badge_columns: default_badge_columns(),
			order_by_columns: true,
			enable_search: true,
			enable_filters: true,
			enable_column_toggle: true,
			enable_tooltip: true,
			enable_page_size_selector: true,
			enable_action_button: true,
			virtualize: false,
			virtualize_threshold: DEFAULT_VIRTUALIZE_THRESHOLD,
			theme: Theme::Default,
			color_palette: None,
			legacy_shim: true,
			detect_phone_by_value: false,
			logging: LoggingSettings::default(),
		}
	}
}

impl GridOptions {
	/// Options with defaults for the given container
	pub fn new(container_id: impl Into<String>) -> Self {
		Self {
			container_id: container_id.into(),
			..Self::default()
		}
	}

	/// Loads options from a `.toml` or `.json` file
	///
	/// # Errors
	///
	/// Returns [`SettingsError::UnsupportedFormat`] for other extensions, or
	/// the read or parse error.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let extension = path.extension().and_then(|s| s.to_str());
		if !matches!(extension, Some("toml") | Some("json")) {
			return Err(SettingsError::UnsupportedFormat(format!(
				"{}: supported formats are .toml, .json",
				path.display()
			)));
		}

		let contents = std::fs::read_to_string(path)?;
		let options = if extension == Some("toml") {
			Self::from_toml_str(&contents)?
		} else {
			Self::from_json_str(&contents)?
		};
		tracing::debug!(path = %path.display(), container_id = %options.container_id, "loaded grid options");
		Ok(options)
	}

	/// Parses options from a JSON document
	pub fn from_json_str(contents: &str) -> Result<Self> {
		Ok(serde_json::from_str(contents)?)
	}

	/// Parses options from a TOML document
	pub fn from_toml_str(contents: &str) -> Result<Self> {
		Ok(toml::from_str(contents)?)
	}

	/// Checks required fields and value domains
	pub fn validate(&self) -> Result<()> {
		if self.container_id.trim().is_empty() {
			return Err(SettingsError::MissingRequired("containerId".to_string()));
		}

		if self.items_per_page_count == Some(0) {
			return Err(SettingsError::InvalidValue {
				key: "itemsPerPageCount".to_string(),
				message: "must be positive".to_string(),
			});
		}

		if self.virtualize_threshold == 0 {
			return Err(SettingsError::InvalidValue {
				key: "virtualizeThreshold".to_string(),
				message: "must be positive".to_string(),
			});
		}

		if let Some(palette) = &self.color_palette
			&& palette.len() != 2
		{
			return Err(SettingsError::InvalidValue {
				key: "colorPalette".to_string(),
				message: format!("expected 2 entries, got {}", palette.len()),
			});
		}

		self.logging.validate()
	}

	/// Palette in effect: the custom palette when set, else the theme's
	pub fn palette(&self) -> Palette {
		match self.color_palette.as_deref() {
			Some([header_bg, button_bg]) => Palette::custom(header_bg.as_str(), button_bg.as_str()),
			_ => self.theme.palette(),
		}
	}

	/// Column inference inputs carried by these options
	pub fn to_inference_config(&self) -> InferenceConfig {
		InferenceConfig {
			included_columns: self.included_columns.clone(),
			excluded_columns: self.excluded_columns.clone(),
			badge_columns: self.badge_columns.clone(),
			detect_phone_by_value: self.detect_phone_by_value,
		}
	}

	/// Sets the initial records
	pub fn with_data(mut self, data: serde_json::Value) -> Self {
		self.data = Some(data);
		self
	}

	/// Sets the ordered column specifiers
	pub fn with_included_columns<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.included_columns = columns.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the excluded fields
	pub fn with_excluded_columns<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.excluded_columns = columns.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the badge columns
	pub fn with_badge_columns<I, S>(mut self, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.badge_columns = columns.into_iter().map(Into::into).collect();
		self
	}

	/// Sets the initial page size
	pub fn with_items_per_page(mut self, count: usize) -> Self {
		self.items_per_page_count = Some(count);
		self
	}

	/// Enables or disables header sorting
	pub fn with_order_by_columns(mut self, enabled: bool) -> Self {
		self.order_by_columns = enabled;
		self
	}

	/// Enables or disables the global search
	pub fn with_search(mut self, enabled: bool) -> Self {
		self.enable_search = enabled;
		self
	}

	/// Enables or disables per-column filters
	pub fn with_filters(mut self, enabled: bool) -> Self {
		self.enable_filters = enabled;
		self
	}

	/// Enables or disables column toggling
	pub fn with_column_toggle(mut self, enabled: bool) -> Self {
		self.enable_column_toggle = enabled;
		self
	}

	/// Enables or disables tooltip hints
	pub fn with_tooltip(mut self, enabled: bool) -> Self {
		self.enable_tooltip = enabled;
		self
	}

	/// Enables or disables the page size selector
	pub fn with_page_size_selector(mut self, enabled: bool) -> Self {
		self.enable_page_size_selector = enabled;
		self
	}

	/// Enables or disables the action button
	pub fn with_action_button(mut self, enabled: bool) -> Self {
		self.enable_action_button = enabled;
		self
	}

	/// Enables row windowing above `threshold` filtered rows
	pub fn with_virtualize(mut self, threshold: usize) -> Self {
		self.virtualize = true;
		self.virtualize_threshold = threshold;
		self
	}

	/// Sets the named theme
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	/// Sets a custom `[header background, accent]` palette
	pub fn with_color_palette(
		mut self,
		header_bg: impl Into<String>,
		button_bg: impl Into<String>,
	) -> Self {
		self.color_palette = Some(vec![header_bg.into(), button_bg.into()]);
		self
	}

	/// Enables or disables the legacy bridge
	pub fn with_legacy_shim(mut self, enabled: bool) -> Self {
		self.legacy_shim = enabled;
		self
	}

	/// Enables or disables value-based phone detection
	pub fn with_detect_phone_by_value(mut self, enabled: bool) -> Self {
		self.detect_phone_by_value = enabled;
		self
	}

	/// Sets the logging settings
	pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
		self.logging = logging;
		self
	}
}
