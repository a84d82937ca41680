//! # Tabula Pagination
//!
//! Page arithmetic for Tabula grids: page counts, clamping, slice bounds, the
//! elided page window shown under a table, and the results summary line.
//!
//! ## Example
//!
//! ```rust
//! use tabula_pagination::{paginate, PageItem};
//!
//! let page = paginate(95, 10, 5).unwrap();
//! assert_eq!(page.total_pages, 10);
//! assert_eq!(page.slice_bounds(), 40..50);
//! assert_eq!(
//!     page.page_window(),
//!     vec![
//!         PageItem::Page(1),
//!         PageItem::Ellipsis,
//!         PageItem::Page(4),
//!         PageItem::Page(5),
//!         PageItem::Page(6),
//!         PageItem::Ellipsis,
//!         PageItem::Page(10),
//!     ]
//! );
//! ```

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;
use thiserror::Error;

/// Default number of rows per page
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_CHOICES: &[usize] = &[5, 10, 20, 50, 100];

/// Pagination errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
	/// Page size of zero
	#[error("Items per page must be greater than zero, got {0}")]
	InvalidPageSize(usize),

	/// Navigation past the first or last page
	#[error("Invalid page: {0}")]
	InvalidPage(String),
}

/// Result alias for pagination operations
pub type Result<T> = std::result::Result<T, PaginationError>;

/// An entry of a page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "number", rename_all = "lowercase")]
pub enum PageItem {
	/// A page link
	Page(usize),
	/// Collapsed run of pages
	Ellipsis,
}

/// Pagination state for one result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	/// Number of items being paginated
	pub total_items: usize,
	/// Number of items per page
	pub per_page: usize,
	/// Total number of pages, at least 1
	pub total_pages: usize,
	/// Current page, 1-indexed and within `1..=total_pages`
	pub current_page: usize,
}

/// Computes the pagination of `total_items`
///
/// `requested_page` is clamped into `1..=total_pages`.
///
/// # Errors
///
/// Returns [`PaginationError::InvalidPageSize`] when `per_page` is zero.
pub fn paginate(total_items: usize, per_page: usize, requested_page: usize) -> Result<Pagination> {
	if per_page == 0 {
		return Err(PaginationError::InvalidPageSize(per_page));
	}
	let total_pages = total_items.div_ceil(per_page).max(1);
	Ok(Pagination {
		total_items,
		per_page,
		total_pages,
		current_page: requested_page.clamp(1, total_pages),
	})
}

impl Pagination {
	/// Bounds of the current page inside the paginated set
	///
	/// # Examples
	///
	/// ```
	/// use tabula_pagination::paginate;
	///
	/// let page = paginate(25, 10, 3).unwrap();
	/// assert_eq!(page.slice_bounds(), 20..25);
	/// ```
	pub fn slice_bounds(&self) -> Range<usize> {
		let start = ((self.current_page - 1) * self.per_page).min(self.total_items);
		let end = (start + self.per_page).min(self.total_items);
		start..end
	}

	/// Number of items on the current page
	pub fn len(&self) -> usize {
		self.slice_bounds().len()
	}

	/// Returns true if the current page holds no item
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// 1-based position of the first item shown, 0 when empty
	pub fn start_index(&self) -> usize {
		if self.is_empty() {
			0
		} else {
			self.slice_bounds().start + 1
		}
	}

	/// 1-based position of the last item shown, 0 when empty
	pub fn end_index(&self) -> usize {
		if self.is_empty() {
			0
		} else {
			self.slice_bounds().end
		}
	}

	/// Returns true if there is a next page
	pub fn has_next(&self) -> bool {
		self.current_page < self.total_pages
	}

	/// Returns true if there is a previous page
	pub fn has_previous(&self) -> bool {
		self.current_page > 1
	}

	/// Returns the next page number
	///
	/// # Errors
	///
	/// Returns [`PaginationError::InvalidPage`] on the last page.
	pub fn next_page_number(&self) -> Result<usize> {
		if self.has_next() {
			Ok(self.current_page + 1)
		} else {
			Err(PaginationError::InvalidPage(
				"That page is the last page".to_string(),
			))
		}
	}

	/// Returns the previous page number
	///
	/// # Errors
	///
	/// Returns [`PaginationError::InvalidPage`] on the first page.
	pub fn previous_page_number(&self) -> Result<usize> {
		if self.has_previous() {
			Ok(self.current_page - 1)
		} else {
			Err(PaginationError::InvalidPage(
				"That page number is less than 1".to_string(),
			))
		}
	}

	/// Every page number
	pub fn page_range(&self) -> std::ops::RangeInclusive<usize> {
		1..=self.total_pages
	}

	/// Page window shown under a table
	///
	/// First and last page, the current page and one neighbour on each side.
	pub fn page_window(&self) -> Vec<PageItem> {
		self.elided_page_range(1, 1)
	}

	/// Elided page range
	///
	/// Keeps `on_ends` pages at each end and `on_each_side` pages around the
	/// current one. Every gap between kept pages, even a single page,
	/// collapses into one [`PageItem::Ellipsis`].
	///
	/// # Examples
	///
	/// ```
	/// use tabula_pagination::{paginate, PageItem};
	///
	/// let page = paginate(100, 10, 3).unwrap();
	/// let window = page.elided_page_range(1, 1);
	/// assert_eq!(window[..5], [
	///     PageItem::Page(1),
	///     PageItem::Page(2),
	///     PageItem::Page(3),
	///     PageItem::Page(4),
	///     PageItem::Ellipsis,
	/// ]);
	/// ```
	pub fn elided_page_range(&self, on_each_side: usize, on_ends: usize) -> Vec<PageItem> {
		let last = self.total_pages;
		let mut shown = BTreeSet::new();
		shown.extend(1..=on_ends.min(last));
		shown.extend(last.saturating_sub(on_ends) + 1..=last);
		shown.extend(
			self.current_page.saturating_sub(on_each_side).max(1)
				..=(self.current_page + on_each_side).min(last),
		);

		let mut result = Vec::with_capacity(shown.len() + 2);
		let mut previous: Option<usize> = None;
		for page in shown {
			if let Some(prev) = previous {
				if page - prev > 1 {
					result.push(PageItem::Ellipsis);
				}
			}
			result.push(PageItem::Page(page));
			previous = Some(page);
		}
		result
	}

	/// Summary line data for the current page
	///
	/// `total_records` is the size of the unfiltered set.
	pub fn summary(&self, total_records: usize) -> ResultsSummary {
		ResultsSummary {
			total: total_records,
			filtered: self.total_items,
			first_shown: self.start_index(),
			last_shown: self.end_index(),
		}
	}
}

/// Data of the "showing X to Y of Z" line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
	/// Records loaded
	pub total: usize,
	/// Records matching the current filters
	pub filtered: usize,
	/// 1-based position of the first row shown, 0 when empty
	pub first_shown: usize,
	/// 1-based position of the last row shown, 0 when empty
	pub last_shown: usize,
}
