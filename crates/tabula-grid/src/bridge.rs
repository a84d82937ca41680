//! Compatibility bridge for hosts built around element identifiers
//!
//! Older host pages address the parts of a grid as `<containerId>__<name>`
//! and read the selected record from one shared slot. Instances created with
//! `legacyShim` keep that slot current.

use serde::Serialize;

/// Element identifier of a grid part
///
/// # Examples
///
/// ```
/// use tabula_grid::bridge::{element_id, element_selector};
///
/// assert_eq!(element_id("calls", "table_body"), "calls__table_body");
/// assert_eq!(element_selector("calls", "global_search"), "#calls__global_search");
/// ```
pub fn element_id(container_id: &str, name: &str) -> String {
	format!("{container_id}__{name}")
}

/// CSS selector of a grid part
pub fn element_selector(container_id: &str, name: &str) -> String {
	format!("#{}", element_id(container_id, name))
}

/// Record selected last, across every bridged instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRecord {
	/// Instance the selection happened in
	pub container_id: String,
	/// Identifier of the selected record
	pub indice: String,
}

/// Shared current-record slot
#[derive(Debug, Clone, Default)]
pub struct LegacyBridge {
	current: Option<CurrentRecord>,
}

impl LegacyBridge {
	/// Selection published last
	pub fn current(&self) -> Option<&CurrentRecord> {
		self.current.as_ref()
	}

	/// Identifier published last
	pub fn current_indice(&self) -> Option<&str> {
		self.current.as_ref().map(|current| current.indice.as_str())
	}

	pub(crate) fn publish(&mut self, container_id: &str, indice: &str) {
		tracing::debug!(container_id, indice, "bridge: current record updated");
		self.current = Some(CurrentRecord {
			container_id: container_id.to_string(),
			indice: indice.to_string(),
		});
	}
}
