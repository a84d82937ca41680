//! Instance events and handlers
//!
//! Each instance holds at most one handler per [`EventKind`]; registering a
//! second handler for the same kind replaces the first. Handler errors are
//! logged and never reach the operation that raised the event.

use crate::error::GridError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tabula_tables::export::ExportFormat;

/// Event handler
pub type Callback = Arc<dyn Fn(&GridEvent) -> anyhow::Result<()> + Send + Sync>;

/// Kind of instance event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
	/// A row was selected by a click
	#[serde(rename = "onRowSelect")]
	RowSelect,
	/// A row was double-clicked
	#[serde(rename = "onRowDblClick")]
	RowDblClick,
	/// The instance was created
	#[serde(rename = "onReady")]
	Ready,
	/// A view was rendered
	#[serde(rename = "onRenderComplete")]
	RenderComplete,
	/// An export file was produced
	#[serde(rename = "onExport")]
	Export,
}

impl EventKind {
	/// Every event kind
	pub const ALL: [EventKind; 5] = [
		EventKind::RowSelect,
		EventKind::RowDblClick,
		EventKind::Ready,
		EventKind::RenderComplete,
		EventKind::Export,
	];

	/// Host-facing event name
	pub fn as_str(self) -> &'static str {
		match self {
			EventKind::RowSelect => "onRowSelect",
			EventKind::RowDblClick => "onRowDblClick",
			EventKind::Ready => "onReady",
			EventKind::RenderComplete => "onRenderComplete",
			EventKind::Export => "onExport",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EventKind {
	type Err = GridError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		EventKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| GridError::UnknownEvent(s.to_string()))
	}
}

/// Event delivered to a handler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GridEvent {
	/// A row was selected
	#[serde(rename = "onRowSelect", rename_all = "camelCase")]
	RowSelect {
		/// Instance identifier
		container_id: String,
		/// Identifier of the selected record
		indice: String,
	},
	/// A row was double-clicked
	#[serde(rename = "onRowDblClick", rename_all = "camelCase")]
	RowDblClick {
		/// Instance identifier
		container_id: String,
		/// Identifier of the record
		indice: String,
	},
	/// The instance was created
	#[serde(rename = "onReady", rename_all = "camelCase")]
	Ready {
		/// Instance identifier
		container_id: String,
	},
	/// A view was rendered
	#[serde(rename = "onRenderComplete", rename_all = "camelCase")]
	RenderComplete {
		/// Instance identifier
		container_id: String,
		/// Rows in the filtered set
		filtered: usize,
		/// Current page
		page: usize,
	},
	/// An export file was produced
	#[serde(rename = "onExport", rename_all = "camelCase")]
	Export {
		/// Instance identifier
		container_id: String,
		/// Format of the file
		format: ExportFormat,
	},
}

impl GridEvent {
	/// Kind of the event
	pub fn kind(&self) -> EventKind {
		match self {
			GridEvent::RowSelect { .. } => EventKind::RowSelect,
			GridEvent::RowDblClick { .. } => EventKind::RowDblClick,
			GridEvent::Ready { .. } => EventKind::Ready,
			GridEvent::RenderComplete { .. } => EventKind::RenderComplete,
			GridEvent::Export { .. } => EventKind::Export,
		}
	}

	/// Instance that raised the event
	pub fn container_id(&self) -> &str {
		match self {
			GridEvent::RowSelect { container_id, .. }
			| GridEvent::RowDblClick { container_id, .. }
			| GridEvent::Ready { container_id }
			| GridEvent::RenderComplete { container_id, .. }
			| GridEvent::Export { container_id, .. } => container_id,
		}
	}
}

/// Handlers of one instance
#[derive(Clone, Default)]
pub struct Callbacks {
	handlers: IndexMap<EventKind, Callback>,
}

impl fmt::Debug for Callbacks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.handlers.keys()).finish()
	}
}

impl Callbacks {
	/// Registers the handler of `kind`, replacing any previous one
	pub fn set(&mut self, kind: EventKind, callback: Callback) {
		self.handlers.insert(kind, callback);
	}

	/// Removes the handler of `kind`
	pub fn remove(&mut self, kind: EventKind) -> bool {
		self.handlers.shift_remove(&kind).is_some()
	}

	/// Whether a handler is registered for `kind`
	pub fn contains(&self, kind: EventKind) -> bool {
		self.handlers.contains_key(&kind)
	}

	/// Delivers `event` to its handler, if any
	pub fn emit(&self, event: &GridEvent) {
		let Some(callback) = self.handlers.get(&event.kind()) else {
			return;
		};
		if let Err(error) = callback(event) {
			tracing::warn!(
				container_id = %event.container_id(),
				event = %event.kind(),
				error = %error,
				"event handler failed"
			);
		}
	}
}
