//! Color themes and palettes

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BACKGROUND_CLASS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"bg-(\w+)-(\d+)").expect("BACKGROUND_CLASS: invalid regex pattern")
});

/// Hover class used when a background class has no recognizable shade
pub const DEFAULT_HOVER_CLASS: &str = "hover:bg-gray-700";

/// Named color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	/// Gray header, blue accent
	#[default]
	Default,
	/// Slate header and accent
	Dark,
	/// Sky header and accent
	Light,
}

impl Theme {
	/// Palette of the theme
	pub fn palette(self) -> Palette {
		let (header_bg, button_bg, button_hover, badge_base) = match self {
			Theme::Default => (
				"bg-gray-50",
				"bg-blue-600",
				"hover:bg-blue-700",
				"bg-blue-100 text-blue-800",
			),
			Theme::Dark => (
				"bg-slate-800",
				"bg-slate-600",
				"hover:bg-slate-700",
				"bg-slate-100 text-slate-800",
			),
			Theme::Light => (
				"bg-sky-50",
				"bg-sky-600",
				"hover:bg-sky-700",
				"bg-sky-100 text-sky-800",
			),
		};
		Palette {
			header_bg: header_bg.to_string(),
			button_bg: button_bg.to_string(),
			button_hover: button_hover.to_string(),
			badge_base: badge_base.to_string(),
		}
	}
}

/// CSS classes a presentation layer applies to the grid chrome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
	/// Header background class
	pub header_bg: String,
	/// Action button background class
	pub button_bg: String,
	/// Action button hover class
	pub button_hover: String,
	/// Base classes of badge cells
	pub badge_base: String,
}

impl Palette {
	/// Builds a palette from a header background and an accent class
	///
	/// The hover class is derived from the accent, the badge classes come from
	/// the default theme.
	pub fn custom(header_bg: impl Into<String>, button_bg: impl Into<String>) -> Self {
		let button_bg = button_bg.into();
		Self {
			header_bg: header_bg.into(),
			button_hover: hover_class(&button_bg),
			button_bg,
			badge_base: Theme::Default.palette().badge_base,
		}
	}
}

/// Derives a hover class one shade darker than a `bg-<color>-<shade>` class
///
/// The shade is capped at 900. Unrecognized classes map to
/// [`DEFAULT_HOVER_CLASS`].
///
/// # Examples
///
/// ```
/// use tabula_conf::settings::hover_class;
///
/// assert_eq!(hover_class("bg-emerald-600"), "hover:bg-emerald-700");
/// assert_eq!(hover_class("bg-red-900"), "hover:bg-red-900");
/// assert_eq!(hover_class("custom"), "hover:bg-gray-700");
/// ```
pub fn hover_class(background: &str) -> String {
	BACKGROUND_CLASS
		.captures(background)
		.and_then(|captures| {
			let shade: u32 = captures[2].parse().ok()?;
			Some(format!("hover:bg-{}-{}", &captures[1], (shade + 100).min(900)))
		})
		.unwrap_or_else(|| DEFAULT_HOVER_CLASS.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Theme::Default, "bg-gray-50", "hover:bg-blue-700")]
	#[case(Theme::Dark, "bg-slate-800", "hover:bg-slate-700")]
	#[case(Theme::Light, "bg-sky-50", "hover:bg-sky-700")]
	fn test_theme_palette(#[case] theme: Theme, #[case] header: &str, #[case] hover: &str) {
		let palette = theme.palette();

		assert_eq!(palette.header_bg, header);
		assert_eq!(palette.button_hover, hover);
	}

	#[rstest]
	#[case("bg-blue-600", "hover:bg-blue-700")]
	#[case("bg-indigo-850", "hover:bg-indigo-900")]
	#[case("text-white bg-teal-50", "hover:bg-teal-150")]
	#[case("bg-blue", DEFAULT_HOVER_CLASS)]
	#[case("", DEFAULT_HOVER_CLASS)]
	fn test_hover_class(#[case] background: &str, #[case] expected: &str) {
		assert_eq!(hover_class(background), expected);
	}

	#[rstest]
	fn test_custom_palette() {
		let palette = Palette::custom("bg-rose-100", "bg-rose-500");

		assert_eq!(palette.header_bg, "bg-rose-100");
		assert_eq!(palette.button_bg, "bg-rose-500");
		assert_eq!(palette.button_hover, "hover:bg-rose-600");
		assert_eq!(palette.badge_base, "bg-blue-100 text-blue-800");
	}

	#[rstest]
	fn test_theme_deserializes_lowercase() {
		let theme: Theme = serde_json::from_str("\"dark\"").unwrap();

		assert_eq!(theme, Theme::Dark);
	}
}
