//! Virtual row window for large result sets

use serde::Serialize;
use std::ops::Range;

/// Fixed row height, in pixels
pub const VIRTUAL_ROW_HEIGHT: usize = 42;
/// Rows rendered above and below the viewport
pub const VIRTUAL_BUFFER: usize = 6;

/// The slice of rows to materialize for a scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualWindow {
	/// First row to render
	pub start: usize,
	/// One past the last row to render
	pub end: usize,
	/// Spacer height above the rendered rows
	pub top_padding: usize,
	/// Spacer height below the rendered rows
	pub bottom_padding: usize,
}

impl VirtualWindow {
	/// Computes the window for `total` rows
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::render::VirtualWindow;
	///
	/// let window = VirtualWindow::compute(5000, 420, 420);
	/// assert_eq!(window.start, 4);
	/// assert_eq!(window.end, 26);
	/// ```
	pub fn compute(total: usize, scroll_top: usize, viewport_height: usize) -> Self {
		let first_visible = scroll_top / VIRTUAL_ROW_HEIGHT;
		let visible_rows = viewport_height.div_ceil(VIRTUAL_ROW_HEIGHT);
		let start = first_visible.saturating_sub(VIRTUAL_BUFFER).min(total);
		let end = (first_visible + visible_rows + VIRTUAL_BUFFER).min(total);
		Self {
			start,
			end,
			top_padding: start * VIRTUAL_ROW_HEIGHT,
			bottom_padding: (total - end) * VIRTUAL_ROW_HEIGHT,
		}
	}

	/// Row range covered by the window
	pub fn range(&self) -> Range<usize> {
		self.start..self.end
	}

	/// Number of rendered rows
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	/// Returns true when no row is rendered
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}
