//! Status classification for badge cells
//!
//! Status text is matched against an ordered table of case-insensitive
//! substring rules. The first rule with a matching pattern wins; text that
//! matches no rule, or is empty, is [`StatusCategory::Unclassified`].

use crate::record::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual category of a status value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
	/// Call back later
	Callback,
	/// Appointment booked
	Appointment,
	/// Follow-up needed
	Followup,
	/// Contact could not be reached
	Unreachable,
	/// Offer declined
	Declined,
	/// Offer accepted
	Accepted,
	/// Being processed
	Processing,
	/// Urgent
	Urgent,
	/// No rule matched
	Unclassified,
}

/// Ordered classification rules
///
/// Patterns are lowercase; the table is scanned top to bottom.
pub const STATUS_RULES: &[(&[&str], StatusCategory)] = &[
	(&["rappel"], StatusCategory::Callback),
	(&["rdv"], StatusCategory::Appointment),
	(&["relance"], StatusCategory::Followup),
	(&["absent", "non répondu"], StatusCategory::Unreachable),
	(&["refus", "négatif"], StatusCategory::Declined),
	(&["positif", "accepté", "validé"], StatusCategory::Accepted),
	(&["en cours", "traitement"], StatusCategory::Processing),
	(&["urgent", "priorité"], StatusCategory::Urgent),
];

/// Text shown in a badge whose value is empty
pub const EMPTY_BADGE_TEXT: &str = "N/A";

impl StatusCategory {
	/// Every category, in rule order, unclassified last
	pub const ALL: [StatusCategory; 9] = [
		StatusCategory::Callback,
		StatusCategory::Appointment,
		StatusCategory::Followup,
		StatusCategory::Unreachable,
		StatusCategory::Declined,
		StatusCategory::Accepted,
		StatusCategory::Processing,
		StatusCategory::Urgent,
		StatusCategory::Unclassified,
	];

	/// Stable identifier, also used as the badge CSS modifier
	pub fn as_str(self) -> &'static str {
		match self {
			StatusCategory::Callback => "callback",
			StatusCategory::Appointment => "appointment",
			StatusCategory::Followup => "followup",
			StatusCategory::Unreachable => "unreachable",
			StatusCategory::Declined => "declined",
			StatusCategory::Accepted => "accepted",
			StatusCategory::Processing => "processing",
			StatusCategory::Urgent => "urgent",
			StatusCategory::Unclassified => "unclassified",
		}
	}
}

impl fmt::Display for StatusCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Classifies status text
///
/// # Examples
///
/// ```
/// use tabula_tables::status::{classify_status, StatusCategory};
///
/// assert_eq!(classify_status("Rappel demain"), StatusCategory::Callback);
/// assert_eq!(classify_status("RDV pris"), StatusCategory::Appointment);
/// assert_eq!(classify_status(""), StatusCategory::Unclassified);
/// ```
pub fn classify_status(text: &str) -> StatusCategory {
	let text = text.to_lowercase();
	STATUS_RULES
		.iter()
		.find(|(patterns, _)| patterns.iter().any(|pattern| text.contains(pattern)))
		.map(|(_, category)| *category)
		.unwrap_or(StatusCategory::Unclassified)
}

/// Counts the category of each value
///
/// Every category is present in the result, in rule order.
pub fn count_statuses<'a, I>(values: I) -> IndexMap<StatusCategory, usize>
where
	I: IntoIterator<Item = Option<&'a Value>>,
{
	let mut counts: IndexMap<StatusCategory, usize> =
		StatusCategory::ALL.iter().map(|category| (*category, 0)).collect();
	for value in values {
		let text = value.map(Value::to_text).unwrap_or_default();
		*counts.entry(classify_status(&text)).or_default() += 1;
	}
	counts
}
