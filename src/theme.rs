//! Theme colours read from the page's CSS custom properties.

use web_sys::CssStyleDeclaration;

use crate::error::AppError;

/// Custom properties defined in `style.css`.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CssVariable {
	Gray200,
	Gray300,
	Gray400,
	Gray500,
	Gray600,
	Gray700,
	Gray800,
	Gray900,
	Purple500,
	Shadow,
}

impl CssVariable {
	/// Property name, leading dashes included.
	pub fn name(self) -> &'static str {
		match self {
			CssVariable::Gray200 => "--gray-200",
			CssVariable::Gray300 => "--gray-300",
			CssVariable::Gray400 => "--gray-400",
			CssVariable::Gray500 => "--gray-500",
			CssVariable::Gray600 => "--gray-600",
			CssVariable::Gray700 => "--gray-700",
			CssVariable::Gray800 => "--gray-800",
			CssVariable::Gray900 => "--gray-900",
			CssVariable::Purple500 => "--purple-500",
			CssVariable::Shadow => "--shadow",
		}
	}
}

/// Computed style of the document root.
pub struct Theme {
	variables: CssStyleDeclaration,
}

impl Theme {
	/// Read the computed style of `<html>`.
	pub fn from_document() -> Result<Self, AppError> {
		let window = web_sys::window().ok_or_else(|| AppError::missing("window"))?;
		let root = window
			.document()
			.and_then(|d| d.document_element())
			.ok_or_else(|| AppError::missing("document element"))?;
		let variables = window
			.get_computed_style(&root)
			.map_err(|e| AppError::dom("getComputedStyle", e))?
			.ok_or_else(|| AppError::missing("computed style"))?;
		Ok(Self { variables })
	}

	/// Trimmed value, `None` when the variable is unset.
	pub fn value(&self, variable: CssVariable) -> Option<String> {
		self.variables
			.get_property_value(variable.name())
			.ok()
			.map(|v| v.trim().to_string())
			.filter(|v| !v.is_empty())
	}

	/// Palette with every set variable applied over the defaults.
	pub fn palette(&self) -> Palette {
		let defaults = Palette::default();
		let pick = |variable, fallback: String| self.value(variable).unwrap_or(fallback);
		Palette {
			background: pick(CssVariable::Gray900, defaults.background),
			link: pick(CssVariable::Gray500, defaults.link),
			label: pick(CssVariable::Gray200, defaults.label),
			male: pick(CssVariable::Gray600, defaults.male),
			female: pick(CssVariable::Gray700, defaults.female),
			outline: pick(CssVariable::Gray400, defaults.outline),
			selection: pick(CssVariable::Purple500, defaults.selection),
			shadow: pick(CssVariable::Shadow, defaults.shadow),
			groups: defaults.groups,
		}
	}
}

/// Resolved colours used by the chart renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	/// Canvas fill.
	pub background: String,
	/// Parent links.
	pub link: String,
	/// Member names.
	pub label: String,
	/// Node fill for men.
	pub male: String,
	/// Node fill for women.
	pub female: String,
	/// Node outline.
	pub outline: String,
	/// Ring around the selected member.
	pub selection: String,
	/// Node drop shadow.
	pub shadow: String,
	/// Group bubble colours, picked by group index.
	pub groups: Vec<String>,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: "#1a1c20".into(),
			link: "#6b7280".into(),
			label: "#e5e7eb".into(),
			male: "#3b4252".into(),
			female: "#4c3b52".into(),
			outline: "#adb3bd".into(),
			selection: "#8b5cf6".into(),
			shadow: "rgba(0, 0, 0, 0.4)".into(),
			groups: [
				"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
				"#7f7f7f", "#bcbd22", "#17becf",
			]
			.map(String::from)
			.to_vec(),
		}
	}
}

impl Palette {
	/// Colour for the group at registry position `index`.
	pub fn group_color(&self, index: usize) -> &str {
		self.groups
			.get(index % self.groups.len().max(1))
			.map_or("#7f7f7f", String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn group_colours_wrap_around() {
		let palette = Palette::default();
		assert_eq!(palette.group_color(0), palette.group_color(palette.groups.len()));
	}

	#[test]
	fn empty_group_list_falls_back_to_gray() {
		let palette = Palette {
			groups: Vec::new(),
			..Palette::default()
		};
		assert_eq!(palette.group_color(3), "#7f7f7f");
	}
}
