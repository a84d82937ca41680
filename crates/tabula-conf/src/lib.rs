//! # Tabula Configuration
//!
//! Options, themes and persisted preferences for Tabula grid instances.
//!
//! ## Features
//!
//! - **Grid options**: camelCase keys, loadable from TOML or JSON files or built in code
//! - **Themes**: three named palettes plus a two-entry custom palette with a derived hover class
//! - **Logging settings**: level and format for hosts that install a subscriber
//! - **Preferences**: per-instance column visibility and page size, kept in memory or on disk
//!
//! ## Quick Start
//!
//! ```rust
//! use tabula_conf::settings::{GridOptions, Theme};
//!
//! let options = GridOptions::new("calls")
//!     .with_items_per_page(25)
//!     .with_theme(Theme::Dark);
//! assert!(options.validate().is_ok());
//! assert_eq!(options.palette().header_bg, "bg-slate-800");
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: grid options, themes and logging settings
//! - [`preferences`]: persisted per-instance preferences

pub mod preferences;
pub mod settings;

pub use preferences::{
	FileStore, MemoryStore, PersistedSettings, PreferenceError, PreferenceStore, settings_key,
};
pub use settings::{GridOptions, LoggingSettings, Palette, SettingsError, Theme};
