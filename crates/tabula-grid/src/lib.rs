//! Grid instances for Tabula
//!
//! This crate ties the table engine, pagination and configuration together
//! into independent grid instances that live in one [`GridRegistry`].
//!
//! ## Features
//!
//! - **Registry**: an explicit context object owning every instance session,
//!   the preference store, the notifier and the legacy bridge
//! - **Instance API**: data loads, selection, filters, search, sort, paging,
//!   column visibility, rendering, status counts and export
//! - **Events**: one handler per event kind; handler errors are logged and
//!   swallowed
//! - **Preferences**: column visibility and page size restored on every load
//!   and saved on every change
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tabula_conf::GridOptions;
//! use tabula_grid::GridRegistry;
//!
//! let mut registry = GridRegistry::new();
//! let mut grid = registry
//!     .create_table(GridOptions::new("calls").with_data(json!([
//!         {"Indice": 1, "Statut": "Rdv"},
//!         {"Indice": 2, "Statut": "Rappel"},
//!     ])))
//!     .unwrap();
//!
//! grid.set_filter("Statut", "rdv").unwrap();
//! let view = grid.render(None).unwrap();
//!
//! assert_eq!(view.view.rows.len(), 1);
//! assert_eq!(view.view.rows[0].identifier, "1");
//! ```

#![warn(missing_docs)]

pub mod bridge;
pub mod error;
pub mod event;
mod handle;
pub mod notifier;
mod registry;
pub mod sample;
mod session;

pub use error::{GridError, Result};
pub use event::{Callback, Callbacks, EventKind, GridEvent};
pub use handle::{
	ActionTarget, DEFAULT_VIEWPORT_HEIGHT, GridHandle, GridView, NO_VISIBLE_COLUMNS_NOTICE, Viewport,
};
pub use notifier::{CollectingNotifier, Notice, Notifier, TracingNotifier};
pub use registry::GridRegistry;
pub use session::{GridState, InstanceSession, MAX_RECORDS};
