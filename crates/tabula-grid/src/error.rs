//! Error types for grid instances

use tabula_conf::SettingsError;
use tabula_pagination::PaginationError;
use tabula_tables::TableError;
use tabula_tables::export::ExportError;
use thiserror::Error;

/// Errors raised by grid operations
///
/// An operation that returns an error leaves the instance state unchanged.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GridError {
	/// The instance identifier is empty
	#[error("containerId is required")]
	MissingContainerId,

	/// The options are invalid
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// The data is not a collection of scalar records, or a column is unknown
	#[error(transparent)]
	Table(#[from] TableError),

	/// The export could not be produced
	#[error(transparent)]
	Export(#[from] ExportError),

	/// The page size is invalid
	#[error(transparent)]
	Pagination(#[from] PaginationError),

	/// The operation belongs to a feature switched off in the options
	#[error("Feature '{0}' is disabled for this instance")]
	FeatureDisabled(&'static str),

	/// A row position is outside the filtered set
	#[error("Row {row} is outside the {len} filtered rows")]
	RowOutOfRange {
		/// Requested position
		row: usize,
		/// Number of filtered rows
		len: usize,
	},

	/// An event name matches no event
	#[error("Unknown event: {0}")]
	UnknownEvent(String),
}

/// Result alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;
