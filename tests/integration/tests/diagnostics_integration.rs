//! Diagnostics emitted when an operation is skipped

use rstest::*;
use serde_json::json;
use tabula::prelude::*;
use tabula::tables::TableError;
use tabula_conf::LoggingSettings;
use tabula_integration_tests::{Harness, call_records, capture_logs};
use tracing_subscriber::EnvFilter;

#[rstest]
fn test_unresolved_column_is_skipped_with_warning() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let mut harness = Harness::new();
	let options = GridOptions::new("calls")
		.with_data(call_records(4))
		.with_included_columns(["Indice", "Montant as Total", "Statut"]);

	// Act
	let grid = harness.registry.create_table(options).unwrap();

	// Assert
	let keys: Vec<&str> = grid
		.session()
		.columns()
		.keys()
		.map(|key| key.as_str())
		.collect();
	assert_eq!(keys, vec!["indice", "statut"]);
	assert!(
		logs.lock()
			.iter()
			.any(|line| line == "[WARN] column not found in sample record, skipping")
	);
}

#[rstest]
fn test_bad_data_reports_and_keeps_state() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let mut harness = Harness::new();
	let mut grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(call_records(7)))
		.unwrap();

	// Act
	let result = grid.load_json(&json!({"Indice": 1}));

	// Assert
	assert!(matches!(
		result,
		Err(GridError::Table(TableError::NotACollection(_)))
	));
	assert_eq!(grid.state().unwrap().total_records, 7);
	assert!(
		logs.lock()
			.iter()
			.any(|line| line == "[ERROR] load_json: expected an array")
	);
}

#[rstest]
#[case(GridOptions::new("calls").with_items_per_page(0))]
#[case(GridOptions::new("calls").with_virtualize(0))]
fn test_invalid_options_create_nothing(#[case] options: GridOptions) {
	let (logs, _guard) = capture_logs();
	let mut harness = Harness::new();

	let result = harness.registry.create_table(options);

	assert!(matches!(result, Err(GridError::Settings(_))));
	assert!(harness.registry.is_empty());
	assert!(
		logs.lock()
			.iter()
			.any(|line| line == "[ERROR] create_table: invalid options")
	);
}

#[rstest]
fn test_export_guard_notice_is_not_an_error_log() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let mut harness = Harness::new();
	let mut grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(json!([{"Indice": 1}])))
		.unwrap();
	grid.toggle_column("Indice").unwrap();

	// Act
	let result = grid.export_csv();

	// Assert
	assert!(result.is_err());
	assert_eq!(harness.notices.drain().len(), 1);
	assert!(!logs.lock().iter().any(|line| line.starts_with("[ERROR]")));
}

#[rstest]
#[case("info")]
#[case("DEBUG")]
#[case("off")]
fn test_logging_directive_builds_env_filter(#[case] level: &str) {
	let settings = LoggingSettings {
		level: level.to_string(),
		..LoggingSettings::default()
	};

	assert!(settings.validate().is_ok());
	assert!(EnvFilter::try_new(settings.directive()).is_ok());
}
