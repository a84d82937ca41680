//! Invariants of the instance API under arbitrary operation sequences

use proptest::prelude::*;
use tabula::prelude::*;
use tabula::tables::ColumnKey;
use tabula_integration_tests::call_records;

const COLUMNS: &[&str] = &["Agent", "Date appel", "Indice", "Statut", "Tel port"];

#[derive(Debug, Clone)]
enum Op {
	Filter(usize, String),
	Search(String),
	Sort(usize),
	Page(usize),
	Next,
	Previous,
	PageSize(usize),
	ToggleColumn(usize),
	Reload(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
	let text = prop::sample::select(vec!["", "rdv", "luc", "06", "2024", "zzz", "a"]);
	prop_oneof![
		(0..COLUMNS.len(), text.clone()).prop_map(|(c, t)| Op::Filter(c, t.to_string())),
		text.prop_map(|t| Op::Search(t.to_string())),
		(0..COLUMNS.len()).prop_map(Op::Sort),
		(0usize..12).prop_map(Op::Page),
		Just(Op::Next),
		Just(Op::Previous),
		prop::sample::select(vec![5usize, 10, 25, 50]).prop_map(Op::PageSize),
		(0..COLUMNS.len()).prop_map(Op::ToggleColumn),
		(1usize..80).prop_map(Op::Reload),
	]
}

fn apply(grid: &mut GridHandle<'_>, op: &Op) {
	match op {
		Op::Filter(column, text) => grid.set_filter(COLUMNS[*column], text).unwrap(),
		Op::Search(text) => grid.set_global_search(text).unwrap(),
		Op::Sort(column) => {
			grid.toggle_sort(COLUMNS[*column]).unwrap();
		}
		Op::Page(page) => {
			grid.set_page(*page).unwrap();
		}
		Op::Next => {
			grid.next_page().unwrap();
		}
		Op::Previous => {
			grid.previous_page().unwrap();
		}
		Op::PageSize(size) => grid.set_items_per_page(*size).unwrap(),
		Op::ToggleColumn(column) => {
			grid.toggle_column(COLUMNS[*column]).unwrap();
		}
		Op::Reload(count) => grid.update_data(&call_records(*count)).unwrap(),
	}
}

proptest! {
	#[test]
	fn prop_page_stays_in_bounds(count in 1usize..80, ops in prop::collection::vec(arb_op(), 0..25)) {
		let mut registry = GridRegistry::new();
		let mut grid = registry
			.create_table(GridOptions::new("calls").with_data(call_records(count)))
			.unwrap();

		for op in &ops {
			apply(&mut grid, op);

			let state = grid.state().unwrap();
			prop_assert!(state.current_page >= 1);
			prop_assert!(state.current_page <= state.total_pages);
			let view = grid.render(None).unwrap();
			prop_assert!(view.view.rows.len() <= state.items_per_page);
		}
	}

	#[test]
	fn prop_at_most_one_sorted_column(ops in prop::collection::vec(arb_op(), 0..25)) {
		let mut registry = GridRegistry::new();
		let mut grid = registry
			.create_table(GridOptions::new("calls").with_data(call_records(20)))
			.unwrap();

		for op in &ops {
			apply(&mut grid, op);

			let sorted = COLUMNS
				.iter()
				.filter(|column| {
					grid.session()
						.query()
						.sort
						.direction_of(ColumnKey::normalize(column).as_str())
						.is_some()
				})
				.count();
			prop_assert!(sorted <= 1);
		}
	}

	#[test]
	fn prop_column_toggle_keeps_filtered_set(
		ops in prop::collection::vec(arb_op(), 0..15),
		column in 0..COLUMNS.len(),
	) {
		let mut registry = GridRegistry::new();
		let mut grid = registry
			.create_table(GridOptions::new("calls").with_data(call_records(40)))
			.unwrap();
		for op in &ops {
			apply(&mut grid, op);
		}
		let before = grid.session().filtered().to_vec();
		let columns_before = grid.render(None).unwrap().view.columns.len();

		let visible = grid.toggle_column(COLUMNS[column]).unwrap();

		prop_assert_eq!(grid.session().filtered(), before.as_slice());
		let columns_after = grid.render(None).unwrap().view.columns.len();
		if visible {
			prop_assert_eq!(columns_after, columns_before + 1);
		} else {
			prop_assert_eq!(columns_after + 1, columns_before);
		}
	}

	#[test]
	fn prop_requery_is_idempotent(ops in prop::collection::vec(arb_op(), 0..20)) {
		let mut registry = GridRegistry::new();
		let mut grid = registry
			.create_table(GridOptions::new("calls").with_data(call_records(50)))
			.unwrap();
		for op in &ops {
			apply(&mut grid, op);
		}
		let search = grid.session().query().global_search.clone();
		grid.set_global_search(&search).unwrap();
		let before = grid.session().filtered().to_vec();

		grid.set_global_search(&search).unwrap();

		prop_assert_eq!(grid.session().filtered(), before.as_slice());
	}
}
