//! Options, themes and persisted preferences.

pub use tabula_conf::*;
