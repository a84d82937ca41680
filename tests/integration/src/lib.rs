//! Integration test utilities for Tabula
//!
//! Shared data builders, registry wiring and a log capture layer for the
//! end-to-end tests.

use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use tabula_conf::MemoryStore;
use tabula_grid::{CollectingNotifier, GridRegistry};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

pub const STATUTS: &[&str] = &["Rdv", "Rappel", "Absent", "Relance", "Refus"];
pub const AGENTS: &[&str] = &["Marie DUPONT", "Luc PETIT", "Nadia BENALI"];

/// `count` call records; `Indice` runs from 1
pub fn call_records(count: usize) -> serde_json::Value {
	json!(
		(0..count)
			.map(|i| json!({
				"Agent": AGENTS[i % AGENTS.len()],
				"Date appel": format!("2024-03-{:02}T09:{:02}:00", 1 + i % 28, i % 60),
				"Indice": i + 1,
				"Statut": STATUTS[i % STATUTS.len()],
				"Tel port": format!("06 12 34 {:02} {:02}", i / 100 % 100, i % 100),
			}))
			.collect::<Vec<_>>()
	)
}

/// Registry together with the collaborators a test inspects
pub struct Harness {
	pub registry: GridRegistry,
	pub store: MemoryStore,
	pub notices: CollectingNotifier,
}

impl Harness {
	pub fn new() -> Self {
		Self::with_store(MemoryStore::new())
	}

	/// Harness sharing `store` with other registries
	pub fn with_store(store: MemoryStore) -> Self {
		let notices = CollectingNotifier::new();
		Self {
			registry: GridRegistry::new()
				.with_store(store.clone())
				.with_notifier(notices.clone()),
			store,
			notices,
		}
	}
}

impl Default for Harness {
	fn default() -> Self {
		Self::new()
	}
}

/// Captured `[LEVEL] message` lines
pub type CapturedLogs = Arc<Mutex<Vec<String>>>;

/// A tracing layer that captures log messages
pub struct LogCapture {
	logs: CapturedLogs,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);
		self.logs
			.lock()
			.push(format!("[{}] {}", event.metadata().level(), visitor.message));
	}
}

/// Installs a capturing subscriber for the current thread
///
/// Events are captured until the returned guard is dropped.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
	let logs = CapturedLogs::default();
	let guard = tracing_subscriber::registry()
		.with(LogCapture {
			logs: Arc::clone(&logs),
		})
		.set_default();
	(logs, guard)
}
