//! Preferences persisted across registries, and options read from disk

use rstest::*;
use serde_json::json;
use std::fs;
use tabula::prelude::*;
use tabula_conf::{FileStore, PersistedSettings, settings_key};
use tabula_grid::CollectingNotifier;
use tabula_integration_tests::{Harness, call_records};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
	TempDir::new().unwrap()
}

#[rstest]
fn test_file_store_restores_preferences(temp_dir: TempDir) {
	// Arrange
	let store_dir = temp_dir.path().join("prefs");
	{
		let mut registry = GridRegistry::new().with_store(FileStore::open(&store_dir).unwrap());
		let mut grid = registry
			.create_table(GridOptions::new("calls").with_data(call_records(40)))
			.unwrap();
		grid.toggle_column("Date appel").unwrap();
		grid.set_items_per_page(25).unwrap();
	}

	// Act
	let mut registry = GridRegistry::new().with_store(FileStore::open(&store_dir).unwrap());
	let grid = registry
		.create_table(GridOptions::new("calls").with_data(call_records(40)))
		.unwrap();

	// Assert
	let state = grid.state().unwrap();
	assert_eq!(state.items_per_page, 25);
	assert_eq!(state.total_pages, 2);
	assert!(!state.visible_columns.is_visible("date_appel"));
	let written = fs::read_to_string(store_dir.join(format!("{}.json", settings_key("calls")))).unwrap();
	let stored: serde_json::Value = serde_json::from_str(&written).unwrap();
	assert_eq!(stored["itemsPerPage"], 25);
	assert_eq!(stored["visibleColumns"]["date_appel"], false);
}

#[rstest]
fn test_preferences_are_kept_per_instance() {
	// Arrange
	let mut harness = Harness::new();
	harness
		.registry
		.create_table(GridOptions::new("left").with_data(call_records(10)))
		.unwrap()
		.toggle_column("Agent")
		.unwrap();

	// Act
	let right = harness
		.registry
		.create_table(GridOptions::new("right").with_data(call_records(10)))
		.unwrap();

	// Assert
	assert!(right.session().visibility().is_visible("agent"));
	assert!(harness.store.load_settings("right").unwrap().is_none());
	let left = harness.store.load_settings("left").unwrap().unwrap();
	assert_eq!(left.visible_columns.get("agent"), Some(&false));
}

#[rstest]
fn test_stored_keys_for_other_columns_are_harmless() {
	// Arrange
	let harness = Harness::new();
	let mut settings = PersistedSettings::default();
	settings.visible_columns.insert("removed_column".to_string(), false);
	settings.visible_columns.insert("statut".to_string(), false);
	harness.store.save_settings("calls", &settings).unwrap();
	let mut harness = Harness::with_store(harness.store);

	// Act
	let grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(call_records(5)))
		.unwrap();

	// Assert
	let view = grid.render(None).unwrap();
	assert_eq!(view.view.columns.len(), 4);
	assert!(view.view.columns.iter().all(|column| column.label != "STATUT"));
}

#[rstest]
fn test_unwritable_store_is_ignored(temp_dir: TempDir) {
	// Arrange
	let store_dir = temp_dir.path().join("prefs");
	let store = FileStore::open(&store_dir).unwrap();
	fs::create_dir_all(store_dir.join(format!("{}.json", settings_key("calls")))).unwrap();
	let mut registry = GridRegistry::new().with_store(store);
	let mut grid = registry
		.create_table(GridOptions::new("calls").with_data(call_records(5)))
		.unwrap();

	// Act
	let toggled = grid.toggle_column("Agent");
	let resized = grid.set_items_per_page(50);

	// Assert
	assert!(!toggled.unwrap());
	assert!(resized.is_ok());
	assert_eq!(grid.session().items_per_page(), 50);
}

#[rstest]
fn test_options_from_json_file(temp_dir: TempDir) {
	// Arrange
	let path = temp_dir.path().join("calls.json");
	let options = json!({
		"containerId": "calls",
		"data": call_records(12),
		"excludedColumns": ["Tel port"],
		"itemsPerPageCount": 5,
		"theme": "dark",
		"enableActionButton": false,
	});
	fs::write(&path, options.to_string()).unwrap();

	// Act
	let options = GridOptions::from_file(&path).unwrap();
	let mut registry = GridRegistry::new().with_notifier(CollectingNotifier::new());
	let mut grid = registry.create_table(options).unwrap();

	// Assert
	let state = grid.state().unwrap();
	assert_eq!(state.total_pages, 3);
	assert_eq!(state.palette.header_bg, "bg-slate-800");
	assert!(!grid.session().columns().contains("tel_port"));
	assert!(matches!(
		grid.action_target(),
		Err(GridError::FeatureDisabled("enableActionButton"))
	));
}

#[rstest]
fn test_options_from_toml_file(temp_dir: TempDir) {
	// Arrange
	let path = temp_dir.path().join("calls.toml");
	fs::write(
		&path,
		r#"
containerId = "calls"
includedColumns = ["Indice", "Agent as Conseiller"]
colorPalette = ["bg-emerald-600", "bg-emerald-500"]
virtualize = true
virtualizeThreshold = 50

[logging]
level = "debug"
format = "json"
"#,
	)
	.unwrap();

	// Act
	let options = GridOptions::from_file(&path).unwrap();
	let mut registry = GridRegistry::new();
	let mut grid = registry.create_table(options).unwrap();
	grid.update_data(&call_records(3)).unwrap();

	// Assert
	let state = grid.state().unwrap();
	assert_eq!(state.palette.header_bg, "bg-emerald-600");
	assert_eq!(state.palette.button_hover, "hover:bg-emerald-600");
	let labels: Vec<String> = grid
		.render(None)
		.unwrap()
		.view
		.columns
		.into_iter()
		.map(|column| column.label)
		.collect();
	assert_eq!(labels, vec!["INDICE", "CONSEILLER"]);
	assert_eq!(
		grid.session().options().logging.directive(),
		"tabula=debug,tabula_tables=debug,tabula_grid=debug,tabula_conf=debug"
	);
}
