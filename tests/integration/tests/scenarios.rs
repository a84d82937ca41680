//! End-to-end behavior of a grid instance, driven through the facade crate

use rstest::*;
use serde_json::json;
use tabula::prelude::*;
use tabula::tables::export::ExportError;
use tabula::tables::render::CellContent;
use tabula_integration_tests::{Harness, call_records};

#[fixture]
fn harness() -> Harness {
	Harness::new()
}

#[rstest]
fn test_column_filter_keeps_matching_record(mut harness: Harness) {
	// Arrange
	let mut grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(json!([
			{"Indice": 1, "Statut": "Rdv"},
			{"Indice": 2, "Statut": "Rappel"},
		])))
		.unwrap();

	// Act
	grid.set_filter("Statut", "rdv").unwrap();

	// Assert
	let filtered: Vec<&Record> = grid.session().filtered_records().collect();
	assert_eq!(filtered.len(), 1);
	assert_eq!(filtered[0].get("Indice"), Some(&Value::Integer(1)));
}

#[rstest]
fn test_third_page_holds_last_five_records(mut harness: Harness) {
	// Arrange
	let mut grid = harness
		.registry
		.create_table(
			GridOptions::new("calls")
				.with_data(call_records(25))
				.with_items_per_page(10),
		)
		.unwrap();

	// Act
	grid.set_page(3).unwrap();
	let view = grid.render(None).unwrap();

	// Assert
	let identifiers: Vec<&str> = view
		.view
		.rows
		.iter()
		.map(|row| row.identifier.as_str())
		.collect();
	assert_eq!(identifiers, vec!["21", "22", "23", "24", "25"]);
	assert_eq!(view.pagination.total_pages, 3);
	assert_eq!(grid.state().unwrap().current_page, 3);
}

#[rstest]
#[case(1, vec!["2", "10"])]
#[case(2, vec!["10", "2"])]
fn test_identifier_sort_is_numeric(
	mut harness: Harness,
	#[case] toggles: usize,
	#[case] expected: Vec<&str>,
) {
	// Arrange
	let mut grid = harness
		.registry
		.create_table(
			GridOptions::new("calls").with_data(json!([{"Indice": "10"}, {"Indice": "2"}])),
		)
		.unwrap();

	// Act
	for _ in 0..toggles {
		grid.toggle_sort("Indice").unwrap();
	}

	// Assert
	let order: Vec<String> = grid
		.session()
		.filtered_records()
		.map(|record| record.identifier().unwrap().to_text())
		.collect();
	assert_eq!(order, expected);
}

#[rstest]
fn test_included_column_alias_resolves(mut harness: Harness) {
	// Arrange
	let options = GridOptions::new("clients")
		.with_data(json!([{"Nom_Client": "Dupont", "Ville": "Lyon"}]))
		.with_included_columns(["nom_client as Client"]);

	// Act
	let grid = harness.registry.create_table(options).unwrap();

	// Assert
	let columns = grid.session().columns();
	assert_eq!(columns.len(), 1);
	let def = columns.get("nom_client").unwrap();
	assert_eq!(def.label, "CLIENT");
	assert_eq!(def.key, "Nom_Client");
	let view = grid.render(None).unwrap();
	assert_eq!(view.view.columns[0].label, "CLIENT");
	assert_eq!(view.view.rows[0].cells[0].content.text(), "Dupont");
}

#[rstest]
fn test_export_without_visible_columns_produces_nothing(mut harness: Harness) {
	// Arrange
	let mut grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(json!([
			{"Indice": 1, "Statut": "Rdv"},
		])))
		.unwrap();
	grid.toggle_column("Indice").unwrap();
	grid.toggle_column("Statut").unwrap();

	// Act
	let csv = grid.export_csv();
	let excel = grid.export_excel();

	// Assert
	assert!(matches!(
		csv,
		Err(GridError::Export(ExportError::NoVisibleColumns))
	));
	assert!(excel.is_err());
	assert_eq!(harness.notices.notices().len(), 2);
}

#[rstest]
fn test_rendered_cells_are_shaped(mut harness: Harness) {
	let grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(call_records(3)))
		.unwrap();

	let view = grid.render(None).unwrap();
	let row = &view.view.rows[1];

	// Identifier column leads the display order
	assert_eq!(view.view.columns[0].label, "INDICE");
	let cell = |label: &str| {
		let position = view
			.view
			.columns
			.iter()
			.position(|column| column.label == label)
			.unwrap();
		&row.cells[position]
	};
	assert_eq!(cell("DATE APPEL").content.text(), "02/03/2024 09:01");
	assert_eq!(cell("TEL PORT").content.text(), "0612340001");
	assert!(matches!(cell("STATUT").content, CellContent::Badge { .. }));
}

#[rstest]
fn test_search_and_filter_combine(mut harness: Harness) {
	// Arrange
	let mut grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(call_records(60)))
		.unwrap();

	// Act
	grid.set_global_search("luc").unwrap();
	let search_only = grid.state().unwrap().filtered_records;
	grid.set_filter("Statut", "rappel").unwrap();
	let combined = grid.state().unwrap().filtered_records;

	// Assert
	// Luc on i % 3 == 1, Rappel on i % 5 == 1
	assert_eq!(search_only, 20);
	assert_eq!(combined, 4);
	assert!(
		grid.session()
			.filtered_records()
			.all(|record| record.get("Agent").unwrap().to_text() == "Luc PETIT")
	);
}

#[rstest]
fn test_two_grids_share_a_registry(mut harness: Harness) {
	// Arrange
	harness
		.registry
		.create_table(GridOptions::new("left").with_data(call_records(30)))
		.unwrap()
		.set_items_per_page(5)
		.unwrap();
	let mut right = harness
		.registry
		.create_table(GridOptions::new("right").with_data(call_records(30)))
		.unwrap();

	// Act
	right.click_row(4).unwrap();

	// Assert
	assert_eq!(right.selected_indice(), Some("5"));
	let left = harness.registry.get("left").unwrap();
	assert_eq!(left.items_per_page(), 5);
	assert_eq!(left.selected_indice(), None);
	assert_eq!(harness.registry.get("right").unwrap().items_per_page(), 10);
	assert_eq!(
		harness.registry.bridge().current().unwrap().container_id,
		"right"
	);
}

#[rstest]
fn test_state_serializes_with_host_keys(mut harness: Harness) {
	let mut grid = harness
		.registry
		.create_table(GridOptions::new("calls").with_data(call_records(12)))
		.unwrap();
	grid.click_row(0).unwrap();

	let state = serde_json::to_value(grid.state().unwrap()).unwrap();

	assert_eq!(state["containerId"], "calls");
	assert_eq!(state["totalRecords"], 12);
	assert_eq!(state["totalPages"], 2);
	assert_eq!(state["selectedIndice"], "1");
	assert_eq!(state["lastTel"], "06 12 34 00 00");
}
