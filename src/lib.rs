//! # Tabula
//!
//! An embeddable data grid state engine. A host creates any number of grid
//! instances, each bound to a container identifier, and drives them through a
//! small interaction API: load records, filter, search, sort, page, toggle
//! columns, select rows and export. Tabula owns the state and computes what to
//! show; drawing it is left to a render adapter supplied by the host.
//!
//! ## Crates
//!
//! - [`tables`]: column inference, query engine, render contract and export
//! - [`pagination`]: page arithmetic and elided page windows
//! - [`conf`]: grid options, themes, logging settings and preference stores
//! - [`grid`]: the instance registry, events and notices
//!
//! ## Quick Example
//!
//! ```rust
//! use tabula::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = GridRegistry::new();
//! let mut grid = registry
//!     .create_table(GridOptions::new("calls").with_data(json!([
//!         {"Indice": 217570, "Agent": "Marie DUPONT", "Statut": "Rdv"},
//!         {"Indice": 217571, "Agent": "Luc PETIT", "Statut": "Rappel"},
//!     ])))
//!     .unwrap();
//!
//! assert_eq!(grid.toggle_sort("Agent").unwrap(), Some(SortDirection::Asc));
//! let view = grid.render(None).unwrap();
//! assert_eq!(view.view.rows[0].identifier, "217571");
//! ```

pub mod conf;
pub mod grid;
pub mod pagination;
pub mod tables;

pub use tabula_conf::{GridOptions, MemoryStore, PreferenceStore, Theme};
pub use tabula_grid::{EventKind, GridError, GridEvent, GridHandle, GridRegistry, GridState};
pub use tabula_pagination::{Pagination, paginate};
pub use tabula_tables::{Record, SortDirection, Value};

pub mod prelude {
	pub use crate::{
		EventKind, GridError, GridEvent, GridHandle, GridOptions, GridRegistry, GridState,
		MemoryStore, Pagination, PreferenceStore, Record, SortDirection, Theme, Value,
	};
}
