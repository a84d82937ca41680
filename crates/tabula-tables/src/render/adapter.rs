//! Presentation adapters

use super::{CellContent, RenderedView};
use crate::query::SortDirection;
use std::borrow::Cow;

/// Turns a [`RenderedView`] into something a host can display
pub trait RenderAdapter {
	/// What the adapter produces
	type Output;

	/// Renders one view
	fn render(&mut self, view: &RenderedView) -> Self::Output;
}

/// Escapes text for HTML element content and attribute values
///
/// Returns the input unchanged when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use tabula_tables::render::escape_text;
///
/// assert_eq!(escape_text("<b>\"Rdv\"</b>"), "&lt;b&gt;&quot;Rdv&quot;&lt;/b&gt;");
/// assert_eq!(escape_text("Dupont"), "Dupont");
/// ```
pub fn escape_text(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Minimal HTML table adapter
///
/// Produces a `<table>` whose element ids follow the `<container>__<name>`
/// convention. Every piece of record text is escaped.
#[derive(Debug, Clone)]
pub struct HtmlTableAdapter {
	container_id: String,
	header_class: String,
	placeholder_text: String,
}

impl HtmlTableAdapter {
	/// Creates an adapter for one container
	pub fn new(container_id: impl Into<String>) -> Self {
		Self {
			container_id: container_id.into(),
			header_class: String::new(),
			placeholder_text: "No visible columns".to_string(),
		}
	}

	/// Sets the CSS class of the header row
	pub fn with_header_class(mut self, class: impl Into<String>) -> Self {
		self.header_class = class.into();
		self
	}

	/// Sets the text of the placeholder column
	pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
		self.placeholder_text = text.into();
		self
	}

	fn element_id(&self, name: &str) -> String {
		format!("{}__{}", self.container_id, name)
	}
}

impl RenderAdapter for HtmlTableAdapter {
	type Output = String;

	fn render(&mut self, view: &RenderedView) -> String {
		let mut html = String::new();
		html.push_str(&format!(
			"<table id=\"{}\"><thead><tr class=\"{}\">",
			escape_text(&self.element_id("table")),
			escape_text(&self.header_class)
		));

		if view.placeholder {
			html.push_str(&format!("<th>{}</th>", escape_text(&self.placeholder_text)));
		}
		for column in &view.columns {
			let sort = match column.sort {
				Some(direction) => format!(" data-sort=\"{}\"", sort_name(direction)),
				None => String::new(),
			};
			html.push_str(&format!(
				"<th data-column=\"{}\"{}>{}</th>",
				escape_text(column.key.as_str()),
				sort,
				escape_text(&column.label)
			));
		}

		html.push_str(&format!(
			"</tr></thead><tbody id=\"{}\">",
			escape_text(&self.element_id("table_body"))
		));
		for row in &view.rows {
			html.push_str(&format!(
				"<tr data-index=\"{}\" data-indice=\"{}\"{}>",
				row.index,
				escape_text(&row.identifier),
				if row.selected { " class=\"selected\"" } else { "" }
			));
			if view.placeholder {
				html.push_str("<td></td>");
			}
			for cell in &row.cells {
				let tooltip = match &cell.tooltip {
					Some(text) => format!(" data-tooltip=\"{}\"", escape_text(text)),
					None => String::new(),
				};
				match &cell.content {
					CellContent::Badge { text, category } => {
						html.push_str(&format!(
							"<td><span class=\"badge badge-{}\">{}</span></td>",
							category,
							escape_text(text)
						));
					}
					CellContent::Text {
						text,
						emphasis,
						truncate,
					} => {
						let mut classes = Vec::new();
						if *emphasis {
							classes.push("emphasis");
						}
						if *truncate {
							classes.push("truncate");
						}
						html.push_str(&format!(
							"<td class=\"{}\"{}>{}</td>",
							classes.join(" "),
							tooltip,
							escape_text(text)
						));
					}
				}
			}
			html.push_str("</tr>");
		}
		html.push_str("</tbody></table>");
		html
	}
}

fn sort_name(direction: SortDirection) -> &'static str {
	match direction {
		SortDirection::Asc => "asc",
		SortDirection::Desc => "desc",
	}
}
