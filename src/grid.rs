//! Grid instances module.
//!
//! The registry, the per-instance interaction API, events and notices.

pub use tabula_grid::*;
