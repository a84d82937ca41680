//! Delimited export of the filtered data
//!
//! Exports cover every filtered record, ignoring pagination, and every visible
//! column in definition order. Values are the raw string coercions, not the
//! shaped display text.
//!
//! ## Example
//!
//! ```rust
//! use tabula_tables::column::{infer_columns, InferenceConfig};
//! use tabula_tables::export::{export_delimited, ExportFormat};
//! use tabula_tables::record::Record;
//!
//! let records = vec![Record::new().with("Indice", 1).with("Nom", "O\"Brien")];
//! let (columns, visibility) = infer_columns(&records, &InferenceConfig::default());
//!
//! let csv = export_delimited(ExportFormat::Csv, &records, &[0], &columns, &visibility).unwrap();
//! assert_eq!(csv, "\"INDICE\",\"NOM\"\r\n\"1\",\"O\"\"Brien\"");
//! ```

use crate::column::{ColumnSet, VisibilityMap};
use crate::record::{Record, Value};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use thiserror::Error;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
	/// Every column is hidden
	#[error("No visible column to export")]
	NoVisibleColumns,

	/// The delimited writer failed
	#[error("CSV writer error: {0}")]
	Csv(#[from] csv::Error),

	/// The writer could not be flushed
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The output is not valid UTF-8
	#[error("Encoding error: {0}")]
	Encoding(#[from] std::string::FromUtf8Error),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
	/// Comma-separated, every field quoted
	Csv,
	/// Tab-separated, opened by spreadsheet software
	Tsv,
}

impl ExportFormat {
	/// File extension of the download
	pub fn extension(self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Tsv => "xls",
		}
	}

	/// MIME type of the download
	pub fn mime_type(self) -> &'static str {
		match self {
			ExportFormat::Csv => "text/csv;charset=utf-8",
			ExportFormat::Tsv => "application/vnd.ms-excel;charset=utf-8",
		}
	}
}

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
	/// Suggested file name, `<container>_export.<ext>`
	pub file_name: String,
	/// MIME type
	pub mime_type: &'static str,
	/// Format
	pub format: ExportFormat,
	/// File content
	pub content: String,
}

impl ExportFile {
	/// Wraps exported text for a container
	pub fn new(container_id: &str, format: ExportFormat, content: String) -> Self {
		Self {
			file_name: format!("{}_export.{}", container_id, format.extension()),
			mime_type: format.mime_type(),
			format,
			content,
		}
	}
}

/// Serializes the given records
///
/// `positions` select and order the records, typically the filtered set.
/// Rows are joined with CRLF and the output carries no trailing line break.
///
/// # Errors
///
/// Returns [`ExportError::NoVisibleColumns`] when every column is hidden.
pub fn export_delimited(
	format: ExportFormat,
	records: &[Record],
	positions: &[usize],
	columns: &ColumnSet,
	visibility: &VisibilityMap,
) -> Result<String, ExportError> {
	let visible: Vec<_> = columns.visible(visibility).map(|(_, def)| def).collect();
	if visible.is_empty() {
		return Err(ExportError::NoVisibleColumns);
	}

	let header: Vec<String> = visible.iter().map(|def| def.label.clone()).collect();
	let rows = positions
		.iter()
		.filter_map(|&position| records.get(position))
		.map(|record| {
			visible
				.iter()
				.map(|def| record.get(&def.key).map(Value::to_text).unwrap_or_default())
				.collect::<Vec<String>>()
		});
	let lines: Vec<Vec<String>> = std::iter::once(header).chain(rows).collect();

	let text = match format {
		ExportFormat::Csv => write_csv(&lines)?,
		ExportFormat::Tsv => write_tsv(&lines),
	};

	tracing::debug!(
		export_format = ?format,
		rows = positions.len(),
		columns = visible.len(),
		"export written"
	);
	Ok(text)
}

fn write_csv(lines: &[Vec<String>]) -> Result<String, ExportError> {
	let mut writer = WriterBuilder::new()
		.terminator(Terminator::CRLF)
		.quote_style(QuoteStyle::Always)
		.from_writer(Vec::new());
	for line in lines {
		writer.write_record(line)?;
	}

	let bytes = writer.into_inner().map_err(|e| e.into_error())?;
	let mut text = String::from_utf8(bytes)?;
	if text.ends_with("\r\n") {
		text.truncate(text.len() - 2);
	}
	Ok(text)
}

// Values go out unquoted, so an empty single-field row stays empty.
fn write_tsv(lines: &[Vec<String>]) -> String {
	lines
		.iter()
		.map(|line| line.join("\t"))
		.collect::<Vec<_>>()
		.join("\r\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{ColumnKey, InferenceConfig, infer_columns};
	use rstest::{fixture, rstest};

	#[fixture]
	fn records() -> Vec<Record> {
		vec![
			Record::new()
				.with("Indice", 1)
				.with("Nom", "Dupont")
				.with("Ville", Value::Null),
			Record::new()
				.with("Indice", 2)
				.with("Nom", "Martin, \"Jr\"")
				.with("Ville", "Dijon"),
		]
	}

	#[rstest]
	fn test_csv_quotes_every_field(records: Vec<Record>) {
		// Arrange
		let (columns, visibility) = infer_columns(&records, &InferenceConfig::default());

		// Act
		let csv = export_delimited(ExportFormat::Csv, &records, &[1, 0], &columns, &visibility)
			.unwrap();

		// Assert
		assert_eq!(
			csv,
			"\"INDICE\",\"NOM\",\"VILLE\"\r\n\
			 \"2\",\"Martin, \"\"Jr\"\"\",\"Dijon\"\r\n\
			 \"1\",\"Dupont\",\"\""
		);
	}

	#[rstest]
	fn test_tsv_uses_raw_values(records: Vec<Record>) {
		let (columns, visibility) = infer_columns(&records, &InferenceConfig::default());

		let tsv = export_delimited(ExportFormat::Tsv, &records, &[0, 1], &columns, &visibility)
			.unwrap();

		assert_eq!(
			tsv,
			"INDICE\tNOM\tVILLE\r\n1\tDupont\t\r\n2\tMartin, \"Jr\"\tDijon"
		);
	}

	#[rstest]
	fn test_hidden_columns_are_left_out(records: Vec<Record>) {
		let (columns, mut visibility) = infer_columns(&records, &InferenceConfig::default());
		visibility.set(ColumnKey::normalize("Nom"), false);

		let tsv = export_delimited(ExportFormat::Tsv, &records, &[0], &columns, &visibility)
			.unwrap();

		assert_eq!(tsv, "INDICE\tVILLE\r\n1\t");
	}

	#[rstest]
	fn test_tsv_single_column_keeps_empty_values_empty(records: Vec<Record>) {
		// Arrange
		let (columns, mut visibility) = infer_columns(&records, &InferenceConfig::default());
		visibility.set(ColumnKey::normalize("Indice"), false);
		visibility.set(ColumnKey::normalize("Nom"), false);

		// Act
		let tsv = export_delimited(ExportFormat::Tsv, &records, &[0, 1], &columns, &visibility)
			.unwrap();

		// Assert
		assert_eq!(tsv, "VILLE\r\n\r\nDijon");
	}

	#[rstest]
	fn test_csv_single_column_quotes_empty_values(records: Vec<Record>) {
		let (columns, mut visibility) = infer_columns(&records, &InferenceConfig::default());
		visibility.set(ColumnKey::normalize("Indice"), false);
		visibility.set(ColumnKey::normalize("Nom"), false);

		let csv = export_delimited(ExportFormat::Csv, &records, &[0, 1], &columns, &visibility)
			.unwrap();

		assert_eq!(csv, "\"VILLE\"\r\n\"\"\r\n\"Dijon\"");
	}

	#[rstest]
	fn test_zero_visible_columns(records: Vec<Record>) {
		let (columns, mut visibility) = infer_columns(&records, &InferenceConfig::default());
		for key in ["indice", "nom", "ville"] {
			visibility.set(ColumnKey::normalize(key), false);
		}

		let result = export_delimited(ExportFormat::Csv, &records, &[0, 1], &columns, &visibility);

		assert!(matches!(result, Err(ExportError::NoVisibleColumns)));
	}

	#[rstest]
	fn test_export_file_naming() {
		let file = ExportFile::new("grid_a", ExportFormat::Tsv, String::new());
		assert_eq!(file.file_name, "grid_a_export.xls");
		assert_eq!(file.mime_type, "application/vnd.ms-excel;charset=utf-8");
	}
}
