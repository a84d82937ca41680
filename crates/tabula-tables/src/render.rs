//! Render contract
//!
//! [`render_view`] turns the current page of an instance into a
//! [`RenderedView`]: the ordered visible columns and one shaped row per record.
//! The view is plain data; turning it into markup is the job of a
//! [`RenderAdapter`].
//!
//! Shaping only affects display. Filtering, sorting and export always work on
//! the raw record values.

mod adapter;
mod window;

pub use adapter::{HtmlTableAdapter, RenderAdapter, escape_text};
pub use window::{VIRTUAL_BUFFER, VIRTUAL_ROW_HEIGHT, VirtualWindow};

use crate::column::{ColumnDef, ColumnKey, ColumnSet, SemanticType, VisibilityMap};
use crate::datetime::{DISPLAY_FORMAT, parse_datetime};
use crate::query::{QuerySpec, SortDirection, fold_accents, strip_whitespace};
use crate::record::{Record, Value};
use crate::status::{EMPTY_BADGE_TEXT, StatusCategory, classify_status};
use serde::Serialize;

/// Cell text longer than this gets a tooltip
pub const TOOLTIP_MIN_CHARS: usize = 20;
/// Same threshold for comment and detail columns
pub const TOOLTIP_MIN_CHARS_LONG_TEXT: usize = 10;
/// Comment and detail cells longer than this are truncated
pub const TRUNCATE_MIN_CHARS_LONG_TEXT: usize = 15;

/// Inputs of one render pass
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
	/// All loaded records
	pub records: &'a [Record],
	/// Positions (into `records`) of the rows to render, in display order
	pub rows: &'a [usize],
	/// Offset of the first row inside the filtered set
	pub first_row: usize,
	/// Column definitions
	pub columns: &'a ColumnSet,
	/// Column visibility
	pub visibility: &'a VisibilityMap,
	/// Current filters and sort, for header indicators
	pub query: &'a QuerySpec,
	/// Identifier of the selected record
	pub selected: Option<&'a str>,
	/// Whether long cells carry a tooltip
	pub tooltips: bool,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedView {
	/// Visible columns in display order
	pub columns: Vec<HeaderColumn>,
	/// Shaped rows
	pub rows: Vec<RenderedRow>,
	/// True when no column is visible; rows then have no cells and the
	/// adapter draws a single full-width placeholder
	pub placeholder: bool,
}

impl RenderedView {
	/// Hands the view to an adapter
	pub fn render_with<A: RenderAdapter>(&self, adapter: &mut A) -> A::Output {
		adapter.render(self)
	}
}

/// A header cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderColumn {
	/// Normalized key
	pub key: ColumnKey,
	/// Display label
	pub label: String,
	/// Sort indicator
	pub sort: Option<SortDirection>,
}

/// A rendered row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow {
	/// Position of the record inside the filtered set
	pub index: usize,
	/// Identifier of the record, as text
	pub identifier: String,
	/// Whether this row is the selected one
	pub selected: bool,
	/// Cells in column order
	pub cells: Vec<RenderedCell>,
}

/// A rendered cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCell {
	/// Column key
	pub key: ColumnKey,
	/// What to draw
	pub content: CellContent,
	/// Full text to show on hover
	pub tooltip: Option<String>,
}

/// Content of a cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellContent {
	/// Plain text
	Text {
		/// Shaped text
		text: String,
		/// Identifier columns are emphasized
		emphasis: bool,
		/// Long text is visually truncated
		truncate: bool,
	},
	/// Status badge
	Badge {
		/// Badge label
		text: String,
		/// Category driving the badge color
		category: StatusCategory,
	},
}

impl CellContent {
	/// The text drawn in the cell
	pub fn text(&self) -> &str {
		match self {
			CellContent::Text { text, .. } | CellContent::Badge { text, .. } => text,
		}
	}
}

/// One entry of the filter bar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterField {
	/// Column key
	pub key: ColumnKey,
	/// Column label, used as placeholder
	pub label: String,
	/// Current filter text
	pub value: String,
	/// Whether the column is visible
	pub visible: bool,
}

/// One entry of the column toggle list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnToggle {
	/// Column key
	pub key: ColumnKey,
	/// Column label
	pub label: String,
	/// Whether the column is visible
	pub checked: bool,
}

/// The column toggle list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnToggleList {
	/// Entries in display order
	pub items: Vec<ColumnToggle>,
	/// True when every column is visible
	pub all_visible: bool,
}

/// Builds the view of the given rows
pub fn render_view(input: &RenderInput<'_>) -> RenderedView {
	let visible = input.columns.ordered_visible(input.visibility);

	let columns: Vec<HeaderColumn> = visible
		.iter()
		.map(|(key, def)| HeaderColumn {
			key: (*key).clone(),
			label: def.label.clone(),
			sort: input.query.sort.direction_of(key.as_str()),
		})
		.collect();

	let rows = input
		.rows
		.iter()
		.enumerate()
		.filter_map(|(offset, &position)| {
			let record = input.records.get(position)?;
			let identifier = record.identifier().map(Value::to_text).unwrap_or_default();
			let selected = input
				.selected
				.is_some_and(|selected| !identifier.is_empty() && selected == identifier);
			let cells = visible
				.iter()
				.map(|(key, def)| shape_cell(key, def, record.get(&def.key), input.tooltips))
				.collect();
			Some(RenderedRow {
				index: input.first_row + offset,
				identifier,
				selected,
				cells,
			})
		})
		.collect();

	RenderedView {
		placeholder: columns.is_empty(),
		columns,
		rows,
	}
}

/// Shapes a raw value for display
///
/// Phone numbers lose their whitespace and parseable dates are formatted as
/// `DD/MM/YYYY HH:mm`. Everything else is the plain string coercion.
///
/// # Examples
///
/// ```
/// use tabula_tables::column::ColumnDef;
/// use tabula_tables::record::Value;
/// use tabula_tables::render::shape_value;
///
/// let tel = ColumnDef::new("Tel port");
/// assert_eq!(shape_value(&tel, Some(&Value::from("06 12 34 56 78"))), "0612345678");
///
/// let date = ColumnDef::new("Date appel");
/// assert_eq!(shape_value(&date, Some(&Value::from("2024-06-25 09:15"))), "25/06/2024 09:15");
/// ```
pub fn shape_value(def: &ColumnDef, value: Option<&Value>) -> String {
	let Some(value) = value.filter(|v| v.is_truthy()) else {
		return value.map(Value::to_text).unwrap_or_default();
	};
	match def.semantic {
		SemanticType::PhoneNumber => strip_whitespace(&value.to_text()),
		SemanticType::DateTime => parse_datetime(value)
			.map(|dt| dt.format(DISPLAY_FORMAT).to_string())
			.unwrap_or_else(|| value.to_text()),
		_ => value.to_text(),
	}
}

fn shape_cell(key: &ColumnKey, def: &ColumnDef, value: Option<&Value>, tooltips: bool) -> RenderedCell {
	let text = shape_value(def, value);

	if def.badge {
		let category = classify_status(&text);
		let text = if text.is_empty() {
			EMPTY_BADGE_TEXT.to_string()
		} else {
			text
		};
		return RenderedCell {
			key: key.clone(),
			content: CellContent::Badge { text, category },
			tooltip: None,
		};
	}

	let length = text.chars().count();
	let field = fold_accents(&def.key.to_lowercase());
	let (is_long, truncate) = if field.contains("comment") || field.contains("detail") {
		(
			length > TOOLTIP_MIN_CHARS_LONG_TEXT,
			length > TRUNCATE_MIN_CHARS_LONG_TEXT,
		)
	} else {
		let is_long = length > TOOLTIP_MIN_CHARS;
		(is_long, is_long)
	};

	RenderedCell {
		key: key.clone(),
		tooltip: (is_long && tooltips).then(|| text.clone()),
		content: CellContent::Text {
			text,
			emphasis: def.semantic == SemanticType::Identifier,
			truncate,
		},
	}
}

/// Builds the filter bar in display order
pub fn filter_bar(
	columns: &ColumnSet,
	visibility: &VisibilityMap,
	query: &QuerySpec,
) -> Vec<FilterField> {
	columns
		.ordered()
		.into_iter()
		.map(|(key, def)| FilterField {
			key: key.clone(),
			label: def.label.clone(),
			value: query.filter(key.as_str()).unwrap_or_default().to_string(),
			visible: visibility.is_visible(key.as_str()),
		})
		.collect()
}

/// Builds the column toggle list in display order
pub fn column_toggles(columns: &ColumnSet, visibility: &VisibilityMap) -> ColumnToggleList {
	ColumnToggleList {
		items: columns
			.ordered()
			.into_iter()
			.map(|(key, def)| ColumnToggle {
				key: key.clone(),
				label: def.label.clone(),
				checked: visibility.is_visible(key.as_str()),
			})
			.collect(),
		all_visible: visibility.all_visible(columns),
	}
}
