//! Demonstration records
//!
//! A call-center shaped data set for trying a grid without a backend. The
//! values cycle through fixed lists so every run produces the same records.

use tabula_tables::Record;

const AGENTS: &[&str] = &[
	"Rachida MESSAOUDI",
	"Marie DUPONT",
	"Pierre BERNARD",
	"Sophie THOMAS",
	"Luc PETIT",
	"Anne ROBERT",
	"Paul RICHARD",
	"Julie MOREAU",
];
const STATUTS: &[&str] = &["Refus argumenté", "Rdv", "Rappel", "Relance", "Test", "Absent"];
const VILLES: &[&str] = &[
	"dijon",
	"paris",
	"lyon",
	"marseille",
	"toulouse",
	"nice",
	"nantes",
	"strasbourg",
];
const SOCIETES: &[&str] = &["", "SARL MARTIN", "EURL BERNARD", "SAS ROBERT", "SASU DUPONT", "SA THOMAS"];

/// First identifier of the generated records
pub const FIRST_INDICE: i64 = 217_570;

/// Minimum size of a generated set
pub const MIN_SAMPLE_SIZE: usize = 50;

/// Number of records generated for a page size
pub fn sample_size(items_per_page: usize) -> usize {
	MIN_SAMPLE_SIZE.max(items_per_page * 10)
}

/// Builds `count` demonstration records
///
/// # Examples
///
/// ```
/// use tabula_grid::sample::sample_records;
///
/// let records = sample_records(3);
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[1].identifier().unwrap().to_text(), "217571");
/// ```
pub fn sample_records(count: usize) -> Vec<Record> {
	(0..count)
		.map(|i| {
			let comment = match i % 3 {
				0 => vec!["Client intéressé"; 22].join(" "),
				1 => "À rappeler".to_string(),
				_ => String::new(),
			};
			let mobile = if i % 2 == 0 {
				let pair = 10 + i % 89;
				format!("06 {pair:02} {pair:02}")
			} else {
				String::new()
			};
			let amount = if i % 4 == 0 {
				((i + 1) * 1000).to_string()
			} else {
				String::new()
			};

			Record::new()
				.with("Agent", AGENTS[i % AGENTS.len()])
				.with("Commentaire", comment)
				.with(
					"Date appel",
					format!("2024-06-{:02} {:02}:{:02}", 25 + i % 5, 9 + i % 12, 15 + i % 45),
				)
				.with("Dpt", "")
				.with("Détail", "")
				.with("Indice", FIRST_INDICE + i as i64)
				.with("Nom prospect", "")
				.with("Nom société", SOCIETES[i % SOCIETES.len()])
				.with("PRIORITE", (i % 5) as i64 - 1)
				.with("Relance", "")
				.with("SIREN", "")
				.with("Statut", STATUTS[i % STATUTS.len()])
				.with("Tel fixe", "")
				.with("Tel port", mobile)
				.with("contact_ville", VILLES[i % VILLES.len()])
				.with("montant", amount)
		})
		.collect()
}
