//! User-visible notices

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// A message meant for the person using the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
	/// Instance that raised the notice
	pub container_id: String,
	/// Message text
	pub message: String,
}

/// Channel through which the registry shows notices to users
pub trait Notifier: Send + Sync {
	/// Shows a notice
	fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(&self, notice: Notice) {
		tracing::warn!(container_id = %notice.container_id, "{}", notice.message);
	}
}

/// Notifier that keeps notices for later inspection
///
/// Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
	notices: Arc<Mutex<Vec<Notice>>>,
}

impl CollectingNotifier {
	/// Creates an empty collector
	pub fn new() -> Self {
		Self::default()
	}

	/// Notices received so far
	pub fn notices(&self) -> Vec<Notice> {
		self.notices.lock().clone()
	}

	/// Removes and returns the notices received so far
	pub fn drain(&self) -> Vec<Notice> {
		std::mem::take(&mut *self.notices.lock())
	}
}

impl Notifier for CollectingNotifier {
	fn notify(&self, notice: Notice) {
		self.notices.lock().push(notice);
	}
}
