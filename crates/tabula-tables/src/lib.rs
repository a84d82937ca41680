//! Data grid engine for Tabula
//!
//! This crate holds the per-instance pipeline of a Tabula grid: it infers
//! columns from a sample record, composes per-column filters, global search and
//! sorting into one deterministic transformation, and shapes the current page
//! for a presentation layer.
//!
//! # Features
//!
//! - **Column Inference**: column sets derived from the first record, with
//!   `"source as alias"` specifiers and exclusions
//! - **Semantic Types**: every column is tagged once (`Identifier`,
//!   `PhoneNumber`, `DateTime`, `Priority`, `Text`) instead of sniffing names at
//!   every read site
//! - **Query Engine**: filters, visible-column search and single-key stable sort
//! - **Status Badges**: ordered substring rule table
//! - **Render Contract**: ordered visible columns and shaped page rows
//! - **Export**: CSV and TSV (requires `export` feature)
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Records] --> B[Column Inference]
//!     B --> C[ColumnSet + VisibilityMap]
//!     A --> D[Query Engine]
//!     C --> D
//!     D --> E[Filtered indices]
//!     E --> F[Render Coordinator]
//!     E --> G[Export]
//!     F --> H[RenderAdapter]
//! ```
//!
//! # Example
//!
//! ```rust
//! use tabula_tables::column::{infer_columns, InferenceConfig};
//! use tabula_tables::query::{apply_query, QuerySpec};
//! use tabula_tables::record::Record;
//! use serde_json::json;
//!
//! let records = Record::batch_from_json(&json!([
//!     {"Indice": 1, "Statut": "Rdv"},
//!     {"Indice": 2, "Statut": "Rappel"},
//! ]))
//! .unwrap();
//!
//! let (columns, visibility) = infer_columns(&records, &InferenceConfig::default());
//! let mut spec = QuerySpec::default();
//! spec.set_filter("statut", "rdv");
//!
//! let filtered = apply_query(&records, &columns, &visibility, &spec);
//! assert_eq!(filtered, vec![0]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
mod datetime;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod query;
pub mod record;
pub mod render;
pub mod status;

// Re-exports for convenience
pub use column::{ColumnDef, ColumnKey, ColumnSet, InferenceConfig, SemanticType, VisibilityMap};
pub use error::{Result, TableError};
pub use query::{QuerySpec, SortDirection, SortState};
pub use record::{Record, Value};
pub use status::StatusCategory;
