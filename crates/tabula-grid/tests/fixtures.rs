//! Common fixtures for tabula-grid tests

use parking_lot::Mutex;
use rstest::*;
use serde_json::json;
use std::sync::Arc;
use tabula_conf::{GridOptions, MemoryStore};
use tabula_grid::{CollectingNotifier, EventKind, GridEvent, GridHandle, GridRegistry};

pub const STATUTS: &[&str] = &["Rdv", "Rappel", "Absent"];
pub const AGENTS: &[&str] = &["Marie DUPONT", "Luc PETIT"];

/// `count` call records as JSON; `Indice` starts at 100
pub fn calls(count: usize) -> serde_json::Value {
	json!(
		(0..count)
			.map(|i| json!({
				"Agent": AGENTS[i % AGENTS.len()],
				"Indice": 100 + i,
				"Statut": STATUTS[i % STATUTS.len()],
				"Tel port": format!("06 00 00 00 {:02}", i),
			}))
			.collect::<Vec<_>>()
	)
}

/// Options of the `calls` instance holding `count` records
pub fn calls_options(count: usize) -> GridOptions {
	GridOptions::new("calls").with_data(calls(count))
}

/// Registry wired to stores and notifiers the test can inspect
pub struct TestRegistry {
	pub registry: GridRegistry,
	pub store: MemoryStore,
	pub notices: CollectingNotifier,
}

#[fixture]
pub fn test_registry() -> TestRegistry {
	let store = MemoryStore::new();
	let notices = CollectingNotifier::new();
	TestRegistry {
		registry: GridRegistry::new()
			.with_store(store.clone())
			.with_notifier(notices.clone()),
		store,
		notices,
	}
}

/// Records every event of `kind` delivered to `grid`
pub fn record_events(grid: &mut GridHandle<'_>, kind: EventKind) -> Arc<Mutex<Vec<GridEvent>>> {
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	grid.on(kind, move |event| {
		sink.lock().push(event.clone());
		Ok(())
	});
	seen
}
