//! Column inference from a sample record

use super::{ColumnDef, ColumnKey, ColumnSet, SemanticType, VisibilityMap, display_label};
use crate::record::Record;
use regex::Regex;
use std::sync::LazyLock;

static ALIAS_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(.+?)\s+as\s+(.+)$").expect("ALIAS_SPECIFIER: invalid regex pattern")
});

/// A parsed entry of the included-columns list
///
/// Either a bare field name or `"<source> as <alias>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpecifier {
	/// Text as written
	pub raw: String,
	/// Field name to resolve
	pub source: String,
	/// Display alias
	pub alias: Option<String>,
}

impl ColumnSpecifier {
	/// Parses one specifier
	///
	/// # Examples
	///
	/// ```
	/// use tabula_tables::column::ColumnSpecifier;
	///
	/// let spec = ColumnSpecifier::parse("nom_client AS Client");
	/// assert_eq!(spec.source, "nom_client");
	/// assert_eq!(spec.alias.as_deref(), Some("Client"));
	/// ```
	pub fn parse(raw: &str) -> Self {
		let trimmed = raw.trim();
		match ALIAS_SPECIFIER.captures(trimmed) {
			Some(caps) => Self {
				raw: raw.to_string(),
				source: caps[1].trim().to_string(),
				alias: Some(caps[2].trim().to_string()),
			},
			None => Self {
				raw: raw.to_string(),
				source: trimmed.to_string(),
				alias: None,
			},
		}
	}
}

/// Inputs of column inference
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
	/// Ordered column specifiers; empty means every field
	pub included_columns: Vec<String>,
	/// Field names to leave out when `included_columns` is empty
	pub excluded_columns: Vec<String>,
	/// Entries that make matching columns render as badges
	pub badge_columns: Vec<String>,
	/// Tag text columns whose sample value looks like a phone number
	pub detect_phone_by_value: bool,
}

impl Default for InferenceConfig {
	fn default() -> Self {
		Self {
			included_columns: Vec::new(),
			excluded_columns: Vec::new(),
			badge_columns: vec!["Statut".to_string()],
			detect_phone_by_value: false,
		}
	}
}

impl InferenceConfig {
	fn is_badge(&self, field: &str) -> bool {
		let field = field.to_lowercase();
		self.badge_columns.iter().any(|entry| {
			let entry = entry.to_lowercase();
			!entry.is_empty() && (field.contains(&entry) || entry.contains(&field))
		})
	}

	fn is_excluded(&self, field: &str, key: &ColumnKey) -> bool {
		self.excluded_columns
			.iter()
			.any(|excluded| excluded == field || excluded == key.as_str())
	}

	fn column(&self, sample: &Record, field: &str) -> ColumnDef {
		ColumnDef {
			key: field.to_string(),
			label: display_label(field),
			semantic: SemanticType::sniff(field, sample.get(field), self.detect_phone_by_value),
			badge: self.is_badge(field),
			alias: None,
			requested: None,
		}
	}
}

/// Builds the column set and initial visibility from the first record
///
/// Every column starts visible. Unresolved specifiers are skipped with a
/// warning.
pub fn infer_columns(records: &[Record], config: &InferenceConfig) -> (ColumnSet, VisibilityMap) {
	let mut columns = ColumnSet::new();
	let mut visibility = VisibilityMap::new();

	let Some(sample) = records.first() else {
		return (columns, visibility);
	};

	if config.included_columns.is_empty() {
		for field in sample.field_names() {
			let key = ColumnKey::normalize(field);
			if config.is_excluded(field, &key) {
				continue;
			}
			visibility.set(key.clone(), true);
			columns.insert(key, config.column(sample, field));
		}
	} else {
		for raw in &config.included_columns {
			let spec = ColumnSpecifier::parse(raw);
			let resolved = find_field(sample, &spec.source).or_else(|| {
				spec.alias
					.as_deref()
					.and_then(|alias| find_field(sample, alias))
			});
			let Some(field) = resolved else {
				tracing::warn!(
					specifier = %raw,
					"column not found in sample record, skipping"
				);
				continue;
			};

			let key = ColumnKey::normalize(field);
			let mut def = config.column(sample, field);
			if let Some(alias) = &spec.alias {
				def.label = display_label(alias);
			}
			def.alias = spec.alias;
			def.requested = Some(spec.raw);

			visibility.set(key.clone(), true);
			columns.insert(key, def);
		}
	}

	tracing::debug!(columns = columns.len(), "columns inferred");
	(columns, visibility)
}

/// Resolves a requested name against the fields of `sample`
fn find_field<'a>(sample: &'a Record, name: &str) -> Option<&'a str> {
	if name.is_empty() {
		return None;
	}
	let wanted = ColumnKey::normalize(name);
	let lowered = name.to_lowercase();

	sample
		.field_names()
		.find(|field| field.to_lowercase() == lowered || ColumnKey::normalize(field) == wanted)
		.or_else(|| {
			sample.field_names().find(|field| {
				let key = ColumnKey::normalize(field);
				!key.as_str().is_empty()
					&& (key.as_str().contains(wanted.as_str())
						|| wanted.as_str().contains(key.as_str()))
			})
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn sample() -> Vec<Record> {
		vec![
			Record::new()
				.with("Indice", 217570)
				.with("Nom_Client", "Dupont")
				.with("Statut", "Rdv confirmé")
				.with("Tel port", "06 12 34 56 78")
				.with("Date appel", "2024-03-01 09:30:00")
				.with("Contact", "01 23 45 67 89"),
		]
	}

	fn config_with(included: &[&str]) -> InferenceConfig {
		InferenceConfig {
			included_columns: included.iter().map(|s| s.to_string()).collect(),
			..InferenceConfig::default()
		}
	}

	#[rstest]
	fn test_empty_records_yield_empty_maps() {
		let (columns, visibility) = infer_columns(&[], &InferenceConfig::default());
		assert!(columns.is_empty());
		assert_eq!(visibility.iter().count(), 0);
	}

	#[rstest]
	fn test_all_fields_in_source_order(sample: Vec<Record>) {
		// Act
		let (columns, visibility) = infer_columns(&sample, &InferenceConfig::default());

		// Assert
		let keys: Vec<&str> = columns.keys().map(ColumnKey::as_str).collect();
		assert_eq!(
			keys,
			vec!["indice", "nom_client", "statut", "tel_port", "date_appel", "contact"]
		);
		assert!(keys.iter().all(|key| visibility.is_visible(key)));
		assert_eq!(columns.get("tel_port").unwrap().label, "TEL PORT");
	}

	#[rstest]
	fn test_semantic_tags_and_badge(sample: Vec<Record>) {
		let (columns, _) = infer_columns(&sample, &InferenceConfig::default());

		assert_eq!(columns.get("indice").unwrap().semantic, SemanticType::Identifier);
		assert_eq!(columns.get("tel_port").unwrap().semantic, SemanticType::PhoneNumber);
		assert_eq!(columns.get("date_appel").unwrap().semantic, SemanticType::DateTime);
		assert_eq!(columns.get("contact").unwrap().semantic, SemanticType::Text);
		assert!(columns.get("statut").unwrap().badge);
		assert!(!columns.get("nom_client").unwrap().badge);
	}

	#[rstest]
	fn test_phone_detection_by_value(sample: Vec<Record>) {
		let config = InferenceConfig {
			detect_phone_by_value: true,
			..InferenceConfig::default()
		};

		let (columns, _) = infer_columns(&sample, &config);

		assert_eq!(columns.get("contact").unwrap().semantic, SemanticType::PhoneNumber);
		assert_eq!(columns.get("nom_client").unwrap().semantic, SemanticType::Text);
	}

	#[rstest]
	fn test_excluded_by_raw_or_normalized_name(sample: Vec<Record>) {
		let config = InferenceConfig {
			excluded_columns: vec!["Contact".to_string(), "date_appel".to_string()],
			..InferenceConfig::default()
		};

		let (columns, _) = infer_columns(&sample, &config);

		assert!(!columns.contains("contact"));
		assert!(!columns.contains("date_appel"));
		assert_eq!(columns.len(), 4);
	}

	#[rstest]
	fn test_alias_sets_label(sample: Vec<Record>) {
		// Arrange
		let config = config_with(&["nom_client as Client"]);

		// Act
		let (columns, _) = infer_columns(&sample, &config);

		// Assert
		let def = columns.get("nom_client").unwrap();
		assert_eq!(def.label, "CLIENT");
		assert_eq!(def.key, "Nom_Client");
		assert_eq!(def.alias.as_deref(), Some("Client"));
		assert_eq!(def.requested.as_deref(), Some("nom_client as Client"));
	}

	#[rstest]
	fn test_specifier_order_is_column_order(sample: Vec<Record>) {
		let config = config_with(&["Statut", "indice", "tel"]);

		let (columns, _) = infer_columns(&sample, &config);

		let keys: Vec<&str> = columns.keys().map(ColumnKey::as_str).collect();
		assert_eq!(keys, vec!["statut", "indice", "tel_port"]);
	}

	#[rstest]
	fn test_unresolved_source_falls_back_to_alias(sample: Vec<Record>) {
		let config = config_with(&["telephone_mobile as Tel"]);

		let (columns, _) = infer_columns(&sample, &config);

		let def = columns.get("tel_port").unwrap();
		assert_eq!(def.label, "TEL");
	}

	#[rstest]
	fn test_unresolved_specifier_is_skipped(sample: Vec<Record>) {
		let config = config_with(&["Ville", "Statut"]);

		let (columns, _) = infer_columns(&sample, &config);

		assert_eq!(columns.len(), 1);
		assert!(columns.contains("statut"));
	}

	#[rstest]
	#[case("Date Appel", Some("Date appel"))]
	#[case("date-appel", Some("Date appel"))]
	#[case("client", Some("Nom_Client"))]
	#[case("indice_fiche", Some("Indice"))]
	#[case("ville", None)]
	#[case("", None)]
	fn test_find_field(sample: Vec<Record>, #[case] name: &str, #[case] expected: Option<&str>) {
		assert_eq!(find_field(&sample[0], name), expected);
	}
}
