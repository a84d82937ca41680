//! Registry of grid instances
//!
//! The registry is the context object every grid operation goes through. It
//! owns the instance sessions, the preference store, the notifier and the
//! legacy bridge. Hosts create one registry and keep it for as long as their
//! grids live; there is no global registry.

use crate::bridge::LegacyBridge;
use crate::error::{GridError, Result};
use crate::event::GridEvent;
use crate::handle::{GridHandle, records_from_json};
use crate::notifier::{Notifier, TracingNotifier};
use crate::session::InstanceSession;
use indexmap::IndexMap;
use std::fmt;
use tabula_conf::{GridOptions, MemoryStore, PreferenceStore};

/// Registry of grid instances, keyed by container identifier
pub struct GridRegistry {
	sessions: IndexMap<String, InstanceSession>,
	store: Box<dyn PreferenceStore>,
	notifier: Box<dyn Notifier>,
	bridge: LegacyBridge,
}

impl Default for GridRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for GridRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GridRegistry")
			.field("instances", &self.sessions.keys().collect::<Vec<_>>())
			.field("bridge", &self.bridge)
			.finish_non_exhaustive()
	}
}

impl GridRegistry {
	/// Creates a registry with an in-memory preference store and a notifier
	/// that logs notices
	pub fn new() -> Self {
		Self {
			sessions: IndexMap::new(),
			store: Box::new(MemoryStore::new()),
			notifier: Box::new(TracingNotifier),
			bridge: LegacyBridge::default(),
		}
	}

	/// Replaces the preference store
	pub fn with_store(mut self, store: impl PreferenceStore + 'static) -> Self {
		self.store = Box::new(store);
		self
	}

	/// Replaces the notifier
	pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
		self.notifier = Box::new(notifier);
		self
	}

	/// Creates or re-creates an instance from options
	///
	/// The options are validated and their `data` is loaded. Handlers already
	/// registered on the instance are kept and receive `onReady`.
	///
	/// # Errors
	///
	/// Returns [`GridError::MissingContainerId`] when `containerId` is empty,
	/// [`GridError::Settings`] for other invalid options and
	/// [`GridError::Table`] when `data` is not a collection of records. The
	/// instance is left untouched in every case.
	///
	/// # Examples
	///
	/// ```
	/// use serde_json::json;
	/// use tabula_conf::GridOptions;
	/// use tabula_grid::GridRegistry;
	///
	/// let mut registry = GridRegistry::new();
	/// let options = GridOptions::new("calls").with_data(json!([
	///     {"Indice": 1, "Statut": "Rdv"},
	///     {"Indice": 2, "Statut": "Rappel"},
	/// ]));
	///
	/// let grid = registry.create_table(options).unwrap();
	/// assert_eq!(grid.state().unwrap().total_records, 2);
	/// ```
	pub fn create_table(&mut self, mut options: GridOptions) -> Result<GridHandle<'_>> {
		if options.container_id.trim().is_empty() {
			tracing::error!("create_table: containerId is required");
			return Err(GridError::MissingContainerId);
		}
		if let Err(error) = options.validate() {
			tracing::error!(container_id = %options.container_id, error = %error, "create_table: invalid options");
			return Err(error.into());
		}

		let records = match options.data.take() {
			Some(data) => records_from_json(&data).inspect_err(|error| {
				tracing::error!(container_id = %options.container_id, error = %error, "create_table: invalid data");
			})?,
			None => Vec::new(),
		};

		let container_id = options.container_id.clone();
		let mut handle = self.instance(&container_id)?;
		handle.install(options, records);
		handle.emit(GridEvent::Ready { container_id });
		Ok(handle)
	}

	/// Handle on an instance, creating its session on first reference
	///
	/// # Errors
	///
	/// Returns [`GridError::MissingContainerId`] when `container_id` is empty.
	pub fn instance(&mut self, container_id: &str) -> Result<GridHandle<'_>> {
		if container_id.trim().is_empty() {
			return Err(GridError::MissingContainerId);
		}
		let Self {
			sessions,
			store,
			notifier,
			bridge,
		} = self;
		let session = sessions
			.entry(container_id.to_string())
			.or_insert_with(|| {
				tracing::debug!(container_id, "instance session created");
				InstanceSession::new(container_id)
			});
		Ok(GridHandle::new(session, &**store, &**notifier, bridge))
	}

	/// Session of an existing instance
	pub fn get(&self, container_id: &str) -> Option<&InstanceSession> {
		self.sessions.get(container_id)
	}

	/// Whether an instance exists
	pub fn contains(&self, container_id: &str) -> bool {
		self.sessions.contains_key(container_id)
	}

	/// Identifiers of every instance, in creation order
	pub fn container_ids(&self) -> impl Iterator<Item = &str> {
		self.sessions.keys().map(String::as_str)
	}

	/// Number of instances
	pub fn len(&self) -> usize {
		self.sessions.len()
	}

	/// Whether the registry holds no instance
	pub fn is_empty(&self) -> bool {
		self.sessions.is_empty()
	}

	/// Legacy bridge shared by every instance
	pub fn bridge(&self) -> &LegacyBridge {
		&self.bridge
	}

	/// Preference store
	pub fn store(&self) -> &dyn PreferenceStore {
		self.store.as_ref()
	}
}
