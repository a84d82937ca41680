//! Per-instance session state

use crate::error::Result;
use crate::event::{Callbacks, EventKind};
use serde::Serialize;
use tabula_conf::{GridOptions, Palette, PersistedSettings, PreferenceStore};
use tabula_pagination::{DEFAULT_ITEMS_PER_PAGE, Pagination, paginate};
use tabula_tables::column::infer_columns;
use tabula_tables::query::apply_query;
use tabula_tables::{ColumnSet, QuerySpec, Record, VisibilityMap};

/// Maximum number of records an instance keeps
pub const MAX_RECORDS: usize = 20_000;

/// State of one grid instance
///
/// Sessions are created by the registry on first reference and live as long
/// as the registry. `filtered` is always derived from `records` and the
/// query; it is never edited in place.
#[derive(Debug)]
pub struct InstanceSession {
	container_id: String,
	pub(crate) options: GridOptions,
	pub(crate) palette: Palette,
	pub(crate) records: Vec<Record>,
	pub(crate) filtered: Vec<usize>,
	pub(crate) current_page: usize,
	pub(crate) items_per_page: usize,
	pub(crate) columns: ColumnSet,
	pub(crate) visibility: VisibilityMap,
	pub(crate) query: QuerySpec,
	pub(crate) selected_indice: Option<String>,
	pub(crate) last_tel: Option<String>,
	pub(crate) action_armed: bool,
	pub(crate) callbacks: Callbacks,
}

impl InstanceSession {
	pub(crate) fn new(container_id: &str) -> Self {
		let options = GridOptions::new(container_id);
		Self {
			container_id: container_id.to_string(),
			palette: options.palette(),
			options,
			records: Vec::new(),
			filtered: Vec::new(),
			current_page: 1,
			items_per_page: DEFAULT_ITEMS_PER_PAGE,
			columns: ColumnSet::new(),
			visibility: VisibilityMap::new(),
			query: QuerySpec::default(),
			selected_indice: None,
			last_tel: None,
			action_armed: false,
			callbacks: Callbacks::default(),
		}
	}

	/// Instance identifier
	pub fn container_id(&self) -> &str {
		&self.container_id
	}

	/// Options in effect
	pub fn options(&self) -> &GridOptions {
		&self.options
	}

	/// Palette derived from the options
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Loaded records, in input order
	pub fn records(&self) -> &[Record] {
		&self.records
	}

	/// Positions of the filtered records, in display order
	pub fn filtered(&self) -> &[usize] {
		&self.filtered
	}

	/// Filtered records, in display order
	pub fn filtered_records(&self) -> impl Iterator<Item = &Record> {
		self.filtered
			.iter()
			.filter_map(|&position| self.records.get(position))
	}

	/// Column definitions
	pub fn columns(&self) -> &ColumnSet {
		&self.columns
	}

	/// Column visibility
	pub fn visibility(&self) -> &VisibilityMap {
		&self.visibility
	}

	/// Filters, search and sort
	pub fn query(&self) -> &QuerySpec {
		&self.query
	}

	/// Current page, 1-based
	pub fn current_page(&self) -> usize {
		self.current_page
	}

	/// Page size
	pub fn items_per_page(&self) -> usize {
		self.items_per_page
	}

	/// Identifier of the selected record
	pub fn selected_indice(&self) -> Option<&str> {
		self.selected_indice.as_deref()
	}

	/// Telephone value of the selected record
	pub fn last_tel(&self) -> Option<&str> {
		self.last_tel.as_deref()
	}

	/// Whether a handler is registered for `kind`
	pub fn has_handler(&self, kind: EventKind) -> bool {
		self.callbacks.contains(kind)
	}

	/// Pagination of the filtered set
	pub fn pagination(&self) -> Result<Pagination> {
		Ok(paginate(
			self.filtered.len(),
			self.items_per_page,
			self.current_page,
		)?)
	}

	/// Snapshot of the session
	pub fn state(&self) -> Result<GridState> {
		let pagination = self.pagination()?;
		Ok(GridState {
			container_id: self.container_id.clone(),
			total_records: self.records.len(),
			filtered_records: self.filtered.len(),
			current_page: pagination.current_page,
			total_pages: pagination.total_pages,
			items_per_page: self.items_per_page,
			visible_columns: self.visibility.clone(),
			query: self.query.clone(),
			selected_indice: self.selected_indice.clone(),
			last_tel: self.last_tel.clone(),
			palette: self.palette.clone(),
		})
	}

	/// Replaces the records and rebuilds every derived field
	///
	/// Column filters and sort are cleared; the global search is kept and
	/// applied to the new records.
	pub(crate) fn load_records(&mut self, mut records: Vec<Record>, store: &dyn PreferenceStore) {
		if records.len() > MAX_RECORDS {
			tracing::warn!(
				container_id = %self.container_id,
				received = records.len(),
				kept = MAX_RECORDS,
				"record limit exceeded, truncating"
			);
			records.truncate(MAX_RECORDS);
		}

		let (columns, mut visibility) =
			infer_columns(&records, &self.options.to_inference_config());
		let persisted = self.load_persisted(store);
		if let Some(persisted) = &persisted {
			visibility.merge_from(
				persisted
					.visible_columns
					.iter()
					.map(|(key, visible)| (key.as_str(), *visible)),
			);
		}

		self.items_per_page = persisted
			.and_then(|persisted| persisted.items_per_page)
			.or(self.options.items_per_page_count)
			.filter(|count| *count > 0)
			.unwrap_or(self.items_per_page);
		self.records = records;
		self.columns = columns;
		self.visibility = visibility;
		self.query.clear_filters();
		self.query.sort.clear();
		self.current_page = 1;
		self.action_armed = false;
		self.recompute();

		tracing::debug!(
			container_id = %self.container_id,
			records = self.records.len(),
			columns = self.columns.len(),
			items_per_page = self.items_per_page,
			"records loaded"
		);
	}

	/// Re-derives the filtered set from the records and the query
	pub(crate) fn recompute(&mut self) {
		self.filtered = apply_query(&self.records, &self.columns, &self.visibility, &self.query);
	}

	/// Moves to `page`, clamped into the valid range
	pub(crate) fn go_to_page(&mut self, page: usize) -> Result<usize> {
		self.current_page = paginate(self.filtered.len(), self.items_per_page, page)?.current_page;
		Ok(self.current_page)
	}

	/// Stores the selection and refreshes the telephone value
	///
	/// The selected record is looked up by the identifying field of the first
	/// record, with loose equality. `last_tel` keeps its previous value when
	/// the record has no telephone value.
	pub(crate) fn select(&mut self, indice: String) {
		let key = self
			.records
			.first()
			.and_then(Record::identifier_field)
			.map(str::to_string);
		let phone = key.and_then(|key| {
			self.records
				.iter()
				.find(|record| record.get(&key).is_some_and(|value| value.loosely_equals(&indice)))
				.and_then(Record::first_phone_value)
				.map(|value| value.to_text())
		});
		if phone.is_some() {
			self.last_tel = phone;
		}
		self.selected_indice = Some(indice);
		self.action_armed = true;
	}

	pub(crate) fn clear_selection(&mut self) {
		self.selected_indice = None;
		self.action_armed = false;
	}

	pub(crate) fn persist(&self, store: &dyn PreferenceStore) {
		let settings = PersistedSettings {
			visible_columns: self
				.visibility
				.iter()
				.map(|(key, visible)| (key.to_string(), visible))
				.collect(),
			items_per_page: Some(self.items_per_page),
		};
		if let Err(error) = store.save_settings(&self.container_id, &settings) {
			tracing::debug!(container_id = %self.container_id, error = %error, "could not persist preferences");
		}
	}

	fn load_persisted(&self, store: &dyn PreferenceStore) -> Option<PersistedSettings> {
		match store.load_settings(&self.container_id) {
			Ok(settings) => settings,
			Err(error) => {
				tracing::debug!(container_id = %self.container_id, error = %error, "ignoring stored preferences");
				None
			}
		}
	}
}

/// Snapshot of an instance, as returned by `state()`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
	/// Instance identifier
	pub container_id: String,
	/// Records loaded
	pub total_records: usize,
	/// Records matching the query
	pub filtered_records: usize,
	/// Current page, 1-based
	pub current_page: usize,
	/// Number of pages, at least 1
	pub total_pages: usize,
	/// Page size
	pub items_per_page: usize,
	/// Column visibility
	pub visible_columns: VisibilityMap,
	/// Filters, search and sort
	pub query: QuerySpec,
	/// Identifier of the selected record
	pub selected_indice: Option<String>,
	/// Telephone value of the selected record
	pub last_tel: Option<String>,
	/// Palette in effect
	pub palette: Palette,
}
