//! Table engine module.
//!
//! Column inference, filters, global search, sorting, status badges, page
//! shaping and export.
//!
//! # Examples
//!
//! ```rust
//! use tabula::tables::{ColumnKey, SortState};
//!
//! let mut sort = SortState::default();
//! sort.toggle(&ColumnKey::normalize("Date appel"));
//! assert!(sort.is_active());
//! ```

pub use tabula_tables::*;
