//! Pagination module.
//!
//! # Examples
//!
//! ```rust
//! use tabula::pagination::paginate;
//!
//! let page = paginate(25, 10, 3).unwrap();
//! assert_eq!(page.slice_bounds(), 20..25);
//! ```

pub use tabula_pagination::*;
