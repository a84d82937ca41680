//! Instance API
//!
//! A [`GridHandle`] borrows the registry for the duration of one or more
//! operations on a single instance. Every operation runs to completion and
//! leaves the instance consistent: the filtered set matches the records and
//! the query, and the current page lies within the page count.

use crate::bridge::LegacyBridge;
use crate::error::{GridError, Result};
use crate::event::{Callback, EventKind, GridEvent};
use crate::notifier::{Notice, Notifier};
use crate::sample::{sample_records, sample_size};
use crate::session::{GridState, InstanceSession};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tabula_conf::{GridOptions, PreferenceStore};
use tabula_pagination::{PAGE_SIZE_CHOICES, PageItem, Pagination, PaginationError, ResultsSummary};
use tabula_tables::export::{ExportError, ExportFile, ExportFormat, export_delimited};
use tabula_tables::render::{
	ColumnToggleList, FilterField, RenderInput, RenderedView, VirtualWindow, column_toggles,
	filter_bar, render_view,
};
use tabula_tables::status::{StatusCategory, count_statuses};
use tabula_tables::{ColumnKey, Record, SortDirection, TableError, Value};

/// Viewport height assumed when a virtualized render gets no viewport
pub const DEFAULT_VIEWPORT_HEIGHT: usize = 400;

/// Notice shown when an export has no column to write
pub const NO_VISIBLE_COLUMNS_NOTICE: &str = "No visible columns to export";

/// Converts JSON data into records
///
/// An array is a batch; a single object is a batch of one.
pub(crate) fn records_from_json(data: &serde_json::Value) -> Result<Vec<Record>> {
	if data.is_object() {
		Ok(vec![Record::from_json(data)?])
	} else {
		Ok(Record::batch_from_json(data)?)
	}
}

/// Scroll state of the element showing a virtualized grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
	/// Scroll offset, in pixels
	pub scroll_top: usize,
	/// Visible height, in pixels
	pub height: usize,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scroll_top: 0,
			height: DEFAULT_VIEWPORT_HEIGHT,
		}
	}
}

/// Everything a presentation layer draws for one instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
	/// Header and rows
	pub view: RenderedView,
	/// Page arithmetic
	pub pagination: Pagination,
	/// Page buttons
	pub pages: Vec<PageItem>,
	/// "Showing X to Y of Z" data
	pub summary: ResultsSummary,
	/// Row window, when the rows are virtualized
	pub window: Option<VirtualWindow>,
}

/// Record the action button applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTarget {
	/// Identifier of the selected record
	pub indice: String,
	/// Telephone value of the selected record
	pub last_tel: Option<String>,
}

/// Handle on one grid instance
pub struct GridHandle<'a> {
	session: &'a mut InstanceSession,
	store: &'a dyn PreferenceStore,
	notifier: &'a dyn Notifier,
	bridge: &'a mut LegacyBridge,
}

impl<'a> GridHandle<'a> {
	pub(crate) fn new(
		session: &'a mut InstanceSession,
		store: &'a dyn PreferenceStore,
		notifier: &'a dyn Notifier,
		bridge: &'a mut LegacyBridge,
	) -> Self {
		Self {
			session,
			store,
			notifier,
			bridge,
		}
	}

	pub(crate) fn install(&mut self, options: GridOptions, records: Vec<Record>) {
		self.session.palette = options.palette();
		self.session.options = options;
		self.session.load_records(records, self.store);
	}

	pub(crate) fn emit(&self, event: GridEvent) {
		self.session.callbacks.emit(&event);
	}

	/// Session of the instance
	pub fn session(&self) -> &InstanceSession {
		self.session
	}

	/// Instance identifier
	pub fn container_id(&self) -> &str {
		self.session.container_id()
	}

	// Data

	/// Replaces the records
	///
	/// `data` is an array of objects or a single object. Column filters and
	/// sort are cleared, the global search is kept.
	///
	/// # Errors
	///
	/// Returns [`GridError::Table`] when `data` is not a collection of scalar
	/// records; the instance keeps its previous records.
	pub fn update_data(&mut self, data: &serde_json::Value) -> Result<()> {
		let records = records_from_json(data).inspect_err(|error| {
			tracing::error!(container_id = %self.container_id(), error = %error, "update_data: invalid data");
		})?;
		self.session.load_records(records, self.store);
		Ok(())
	}

	/// Replaces the records with a JSON array of objects
	///
	/// # Errors
	///
	/// Unlike [`update_data`](Self::update_data), a single object is rejected
	/// with [`TableError::NotACollection`].
	pub fn load_json(&mut self, data: &serde_json::Value) -> Result<()> {
		let records = Record::batch_from_json(data).inspect_err(|error| {
			tracing::error!(container_id = %self.container_id(), error = %error, "load_json: expected an array");
		})?;
		self.session.load_records(records, self.store);
		Ok(())
	}

	/// Replaces the records with already-built records
	pub fn load_records(&mut self, records: Vec<Record>) {
		self.session.load_records(records, self.store);
	}

	/// Replaces the records with demonstration data
	///
	/// Ten pages' worth of records at the current page size, at least 50.
	pub fn load_sample_data(&mut self) {
		let count = sample_size(self.session.items_per_page);
		self.session.load_records(sample_records(count), self.store);
	}

	// Selection

	/// Selects a record by identifier without raising `onRowSelect`
	///
	/// A blank identifier clears the selection.
	pub fn select_indice(&mut self, indice: impl Into<Value>) {
		let indice = indice.into();
		if indice.is_blank() {
			self.session.clear_selection();
			return;
		}
		self.select(indice.to_text());
	}

	/// Identifier of the selected record
	pub fn selected_indice(&self) -> Option<&str> {
		self.session.selected_indice()
	}

	/// Telephone value of the selected record
	pub fn last_tel(&self) -> Option<&str> {
		self.session.last_tel()
	}

	/// Selects the record at `row` of the filtered set and raises `onRowSelect`
	///
	/// Returns the identifier of the selected record.
	pub fn click_row(&mut self, row: usize) -> Result<String> {
		let indice = self.identifier_at(row)?;
		self.select(indice.clone());
		self.emit(GridEvent::RowSelect {
			container_id: self.container_id().to_string(),
			indice: indice.clone(),
		});
		Ok(indice)
	}

	/// Raises `onRowDblClick` for the record at `row` of the filtered set
	pub fn double_click_row(&mut self, row: usize) -> Result<String> {
		let indice = self.identifier_at(row)?;
		self.emit(GridEvent::RowDblClick {
			container_id: self.container_id().to_string(),
			indice: indice.clone(),
		});
		Ok(indice)
	}

	/// Whether the action button is enabled
	///
	/// True after a selection, until the action is taken or the records are
	/// reloaded.
	pub fn action_enabled(&self) -> bool {
		self.session.options.enable_action_button
			&& self.session.action_armed
			&& self.session.selected_indice.is_some()
	}

	/// Takes the action on the selected record
	///
	/// Returns the target and disables the button until the next selection,
	/// or `None` when the button is disabled.
	pub fn action_target(&mut self) -> Result<Option<ActionTarget>> {
		self.require(self.session.options.enable_action_button, "enableActionButton")?;
		if !self.action_enabled() {
			return Ok(None);
		}
		self.session.action_armed = false;
		Ok(self.session.selected_indice.clone().map(|indice| ActionTarget {
			indice,
			last_tel: self.session.last_tel.clone(),
		}))
	}

	// State

	/// Snapshot of the instance
	pub fn state(&self) -> Result<GridState> {
		self.session.state()
	}

	/// Registers the handler of an event, replacing any previous one
	///
	/// # Examples
	///
	/// ```
	/// use tabula_grid::{EventKind, GridRegistry};
	///
	/// let mut registry = GridRegistry::new();
	/// registry
	///     .instance("calls")
	///     .unwrap()
	///     .on(EventKind::RowSelect, |event| {
	///         println!("selected in {}", event.container_id());
	///         Ok(())
	///     });
	/// ```
	pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
	where
		F: Fn(&GridEvent) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		let callback: Callback = Arc::new(handler);
		self.session.callbacks.set(kind, callback);
		self
	}

	/// Registers a handler by host event name, e.g. `"onRowSelect"`
	pub fn on_named<F>(&mut self, name: &str, handler: F) -> Result<&mut Self>
	where
		F: Fn(&GridEvent) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		let kind = name.parse()?;
		Ok(self.on(kind, handler))
	}

	// Query

	/// Sets the filter text of a column; empty text removes the filter
	///
	/// Moves to the first page.
	pub fn set_filter(&mut self, column: &str, text: &str) -> Result<()> {
		self.require(self.session.options.enable_filters, "enableFilters")?;
		let key = self.known_column(column)?;
		self.session.query.set_filter(key.as_str(), text);
		self.requery();
		Ok(())
	}

	/// Removes every column filter
	pub fn clear_filters(&mut self) -> Result<()> {
		self.require(self.session.options.enable_filters, "enableFilters")?;
		self.session.query.clear_filters();
		self.requery();
		Ok(())
	}

	/// Sets the global search text; empty text removes the search
	///
	/// Moves to the first page.
	pub fn set_global_search(&mut self, text: &str) -> Result<()> {
		self.require(self.session.options.enable_search, "enableSearch")?;
		self.session.query.set_global_search(text);
		self.requery();
		Ok(())
	}

	/// Advances the sort of a column: none, ascending, descending, none
	///
	/// Other columns lose their sort. Moves to the first page.
	pub fn toggle_sort(&mut self, column: &str) -> Result<Option<SortDirection>> {
		self.require(self.session.options.order_by_columns, "orderByColumns")?;
		let key = self.known_column(column)?;
		let direction = self.session.query.sort.toggle(&key);
		self.requery();
		Ok(direction)
	}

	// Paging

	/// Moves to `page`, clamped into the valid range
	pub fn set_page(&mut self, page: usize) -> Result<usize> {
		self.session.go_to_page(page)
	}

	/// Moves to the next page; stays on the last page
	pub fn next_page(&mut self) -> Result<usize> {
		let page = self.session.current_page.saturating_add(1);
		self.session.go_to_page(page)
	}

	/// Moves to the previous page; stays on the first page
	pub fn previous_page(&mut self) -> Result<usize> {
		let page = self.session.current_page.saturating_sub(1);
		self.session.go_to_page(page)
	}

	/// Changes the page size, moves to the first page and persists the choice
	pub fn set_items_per_page(&mut self, count: usize) -> Result<()> {
		self.require(
			self.session.options.enable_page_size_selector,
			"enablePageSizeSelector",
		)?;
		if count == 0 {
			return Err(PaginationError::InvalidPageSize(count).into());
		}
		self.session.items_per_page = count;
		self.session.current_page = 1;
		self.session.persist(self.store);
		Ok(())
	}

	/// Page arithmetic of the filtered set
	pub fn pagination(&self) -> Result<Pagination> {
		self.session.pagination()
	}

	/// "Showing X to Y of Z" data
	pub fn summary(&self) -> Result<ResultsSummary> {
		Ok(self.pagination()?.summary(self.session.records.len()))
	}

	// Columns

	/// Flips the visibility of a column and persists it
	///
	/// The filtered set is not recomputed. Returns the new visibility.
	pub fn toggle_column(&mut self, column: &str) -> Result<bool> {
		self.require(self.session.options.enable_column_toggle, "enableColumnToggle")?;
		let key = self.known_column(column)?;
		let visible = self.session.visibility.toggle(&key);
		self.session.persist(self.store);
		Ok(visible)
	}

	/// Makes every column visible and persists it
	pub fn show_all_columns(&mut self) -> Result<()> {
		self.require(self.session.options.enable_column_toggle, "enableColumnToggle")?;
		let session = &mut *self.session;
		session.visibility.show_all(&session.columns);
		session.persist(self.store);
		Ok(())
	}

	/// Filter inputs, one per column in display order
	pub fn filter_bar(&self) -> Result<Vec<FilterField>> {
		self.require(self.session.options.enable_filters, "enableFilters")?;
		Ok(filter_bar(
			&self.session.columns,
			&self.session.visibility,
			&self.session.query,
		))
	}

	/// Column toggle list
	pub fn column_toggles(&self) -> Result<ColumnToggleList> {
		self.require(self.session.options.enable_column_toggle, "enableColumnToggle")?;
		Ok(column_toggles(&self.session.columns, &self.session.visibility))
	}

	/// Page sizes offered by the page-size selector
	///
	/// A current size outside the usual choices, restored from preferences
	/// for instance, is listed in order so it stays selectable.
	pub fn page_size_choices(&self) -> Result<Vec<usize>> {
		self.require(
			self.session.options.enable_page_size_selector,
			"enablePageSizeSelector",
		)?;
		let mut choices = PAGE_SIZE_CHOICES.to_vec();
		if let Err(position) = choices.binary_search(&self.session.items_per_page) {
			choices.insert(position, self.session.items_per_page);
		}
		Ok(choices)
	}

	// Render

	/// Renders the current page and raises `onRenderComplete`
	///
	/// When `virtualize` is on and the filtered set is larger than
	/// `virtualizeThreshold`, only the rows of the page inside `viewport`
	/// (plus a buffer) are shaped.
	pub fn render(&self, viewport: Option<Viewport>) -> Result<GridView> {
		let session = &*self.session;
		let pagination = session.pagination()?;
		let bounds = pagination.slice_bounds();
		let page_rows = &session.filtered[bounds.clone()];

		let virtualized = session.options.virtualize
			&& session.filtered.len() > session.options.virtualize_threshold;
		let (rows, first_row, window) = if virtualized {
			let viewport = viewport.unwrap_or_default();
			let window = VirtualWindow::compute(page_rows.len(), viewport.scroll_top, viewport.height);
			(&page_rows[window.range()], bounds.start + window.start, Some(window))
		} else {
			(page_rows, bounds.start, None)
		};

		let view = render_view(&RenderInput {
			records: &session.records,
			rows,
			first_row,
			columns: &session.columns,
			visibility: &session.visibility,
			query: &session.query,
			selected: session.selected_indice.as_deref(),
			tooltips: session.options.enable_tooltip,
		});
		let grid_view = GridView {
			view,
			pages: pagination.page_window(),
			summary: pagination.summary(session.records.len()),
			pagination,
			window,
		};

		tracing::debug!(
			container_id = %session.container_id(),
			rows = grid_view.view.rows.len(),
			page = pagination.current_page,
			virtualized,
			"rendered"
		);
		self.emit(GridEvent::RenderComplete {
			container_id: session.container_id().to_string(),
			filtered: session.filtered.len(),
			page: pagination.current_page,
		});
		Ok(grid_view)
	}

	// Export

	/// Exports the filtered records as CSV
	pub fn export_csv(&self) -> Result<ExportFile> {
		self.export(ExportFormat::Csv)
	}

	/// Exports the filtered records as a tab-separated spreadsheet file
	pub fn export_excel(&self) -> Result<ExportFile> {
		self.export(ExportFormat::Tsv)
	}

	/// Exports every filtered record, ignoring pagination
	///
	/// # Errors
	///
	/// With every column hidden, a notice is sent and
	/// [`ExportError::NoVisibleColumns`] is returned; no file is produced.
	pub fn export(&self, format: ExportFormat) -> Result<ExportFile> {
		let session = &*self.session;
		let content = match export_delimited(
			format,
			&session.records,
			&session.filtered,
			&session.columns,
			&session.visibility,
		) {
			Ok(content) => content,
			Err(ExportError::NoVisibleColumns) => {
				self.notifier.notify(Notice {
					container_id: session.container_id().to_string(),
					message: NO_VISIBLE_COLUMNS_NOTICE.to_string(),
				});
				return Err(ExportError::NoVisibleColumns.into());
			}
			Err(error) => {
				tracing::error!(container_id = %session.container_id(), error = %error, "export failed");
				return Err(error.into());
			}
		};

		let file = ExportFile::new(session.container_id(), format, content);
		self.emit(GridEvent::Export {
			container_id: session.container_id().to_string(),
			format,
		});
		Ok(file)
	}

	/// Status counts over the filtered set, for the first badge column
	///
	/// `None` when no column renders as a badge.
	pub fn status_counts(&self) -> Option<IndexMap<StatusCategory, usize>> {
		let session = &*self.session;
		let (_, def) = session.columns.iter().find(|(_, def)| def.badge)?;
		Some(count_statuses(
			session.filtered_records().map(|record| record.get(&def.key)),
		))
	}

	fn select(&mut self, indice: String) {
		self.session.select(indice);
		if self.session.options.legacy_shim
			&& let Some(indice) = self.session.selected_indice.as_deref()
		{
			self.bridge.publish(self.session.container_id(), indice);
		}
	}

	fn identifier_at(&self, row: usize) -> Result<String> {
		let session = &*self.session;
		session
			.filtered
			.get(row)
			.and_then(|&position| session.records.get(position))
			.map(|record| record.identifier().map(Value::to_text).unwrap_or_default())
			.ok_or(GridError::RowOutOfRange {
				row,
				len: session.filtered.len(),
			})
	}

	fn known_column(&self, column: &str) -> Result<ColumnKey> {
		let key = ColumnKey::normalize(column);
		if self.session.columns.contains(key.as_str()) {
			Ok(key)
		} else {
			Err(TableError::UnknownColumn(column.to_string()).into())
		}
	}

	fn require(&self, enabled: bool, feature: &'static str) -> Result<()> {
		if enabled {
			Ok(())
		} else {
			tracing::debug!(container_id = %self.container_id(), feature, "operation rejected, feature disabled");
			Err(GridError::FeatureDisabled(feature))
		}
	}

	fn requery(&mut self) {
		self.session.recompute();
		self.session.current_page = 1;
		tracing::debug!(
			container_id = %self.container_id(),
			filtered = self.session.filtered.len(),
			"query applied"
		);
	}
}
