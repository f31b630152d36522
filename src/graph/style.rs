//! Stateless presentation rules: category palette, spotlight treatment and
//! initial node placement for each layout mode.

use std::f64::consts::PI;

use super::model::{GraphDataset, Node};

/// One color per category, in declaration order.
pub const PALETTE: &[&str] = &[
	"#1890ff", "#13c2c2", "#722ed1", "#fa8c16", "#52c41a", "#eb2f96", "#faad14", "#f5222d",
	"#2f54eb", "#722ed1", "#d48806", "#08979c",
];

/// Gold used for the spotlight node and its label.
pub const SPOTLIGHT_COLOR: &str = "#faad14";
/// Fixed spotlight diameter.
pub const SPOTLIGHT_SIZE: f64 = 80.0;
/// Nodes bigger than this always show their label.
pub const LABEL_THRESHOLD: f64 = 25.0;
/// Ring radius used by the circular layout, as a share of the smaller viewport side.
const RING_SHARE: f64 = 0.38;

/// How nodes are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
	/// Live force simulation.
	#[default]
	Force,
	/// Fixed ring.
	Circular,
}

impl LayoutMode {
	/// Button caption.
	pub fn label(self) -> &'static str {
		match self {
			Self::Force => "力导向",
			Self::Circular => "环形",
		}
	}
}

/// Page and canvas color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	/// Default scheme.
	#[default]
	Light,
	/// Dark scheme.
	Dark,
}

impl Theme {
	/// Value for the `data-theme` attribute on `<body>`.
	pub fn as_attr(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	/// Canvas fill.
	pub fn background(self) -> &'static str {
		match self {
			Self::Light => "#f4f6f9",
			Self::Dark => "#141414",
		}
	}

	/// Label color for ordinary nodes.
	pub fn text(self) -> &'static str {
		match self {
			Self::Light => "#1f1f1f",
			Self::Dark => "#e6f7ff",
		}
	}

	/// Stroke drawn behind labels.
	pub fn label_outline(self) -> &'static str {
		match self {
			Self::Light => "#fff",
			Self::Dark => "#000",
		}
	}

	/// Node shadow color.
	pub fn shadow(self) -> &'static str {
		match self {
			Self::Light => "rgba(0,0,0,0.2)",
			Self::Dark => "rgba(255,255,255,0.2)",
		}
	}
}

/// Everything the renderer needs to draw one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStyle {
	/// Fill color.
	pub color: String,
	/// Diameter in world units.
	pub size: f64,
	/// Draw the name next to the node.
	pub show_label: bool,
	/// Label fill.
	pub label_color: &'static str,
	/// Label font size.
	pub font_px: f64,
	/// Bold label.
	pub bold: bool,
	/// Shadow blur radius.
	pub shadow_blur: f64,
	/// Shadow color.
	pub shadow_color: &'static str,
	/// White ring drawn around the node.
	pub border: bool,
}

/// Palette color for a category. Unknown categories take the first color.
pub fn category_color(dataset: &GraphDataset, category: &str) -> &'static str {
	let idx = dataset.category_index(category).unwrap_or(0);
	PALETTE[idx % PALETTE.len()]
}

/// Legend entries: every declared category with its color, in declaration order.
pub fn legend(dataset: &GraphDataset) -> Vec<(&str, &'static str)> {
	dataset
		.categories
		.iter()
		.map(|c| (c.name.as_str(), category_color(dataset, &c.name)))
		.collect()
}

/// Style for one node under `theme`. The spotlight node overrides category styling.
pub fn node_style(dataset: &GraphDataset, node: &Node, theme: Theme) -> NodeStyle {
	if node.is_spotlight() {
		return NodeStyle {
			color: SPOTLIGHT_COLOR.into(),
			size: SPOTLIGHT_SIZE,
			show_label: true,
			label_color: SPOTLIGHT_COLOR,
			font_px: 18.0,
			bold: true,
			shadow_blur: 30.0,
			shadow_color: "rgba(250, 173, 20, 0.6)",
			border: true,
		};
	}
	NodeStyle {
		color: category_color(dataset, &node.category).into(),
		size: node.symbol_size,
		show_label: node.symbol_size > LABEL_THRESHOLD,
		label_color: theme.text(),
		font_px: 12.0,
		bold: false,
		shadow_blur: 10.0,
		shadow_color: theme.shadow(),
		border: false,
	}
}

/// Starting point for node `index` of `count`, centred on the origin.
///
/// Circular places every node on a ring; force starts from a small ring and lets
/// the simulation spread it out.
pub fn initial_position(
	index: usize,
	count: usize,
	layout: LayoutMode,
	width: f64,
	height: f64,
) -> (f64, f64) {
	if count == 0 {
		return (0.0, 0.0);
	}
	let angle = (index as f64) * 2.0 * PI / count as f64;
	let radius = match layout {
		LayoutMode::Force => 100.0,
		LayoutMode::Circular => width.min(height) * RING_SHARE,
	};
	(radius * angle.cos(), radius * angle.sin())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::Category;
	use crate::graph::model::fixtures::{dataset, node};

	#[test]
	fn colors_follow_category_order() {
		let data = dataset();
		assert_eq!(category_color(&data, "root"), PALETTE[0]);
		assert_eq!(category_color(&data, "phenomenon"), PALETTE[1]);
		assert_eq!(category_color(&data, "undeclared"), PALETTE[0]);
	}

	#[test]
	fn legend_follows_category_declaration() {
		let data = dataset();
		let entries = legend(&data);
		let names: Vec<_> = entries.iter().map(|(name, _)| *name).collect();
		assert_eq!(names, vec!["root", "phenomenon", "expert"]);
		assert_eq!(entries[0].1, PALETTE[0]);
		assert_eq!(entries[2].1, PALETTE[2]);
		assert_eq!(entries[1].1, category_color(&data, "phenomenon"));
	}

	#[test]
	fn legend_wraps_palette() {
		let mut data = dataset();
		data.categories = (0..PALETTE.len() + 1)
			.map(|i| Category { name: format!("c{i}") })
			.collect();
		let entries = legend(&data);
		assert_eq!(entries.len(), PALETTE.len() + 1);
		assert_eq!(entries[PALETTE.len()].1, PALETTE[0]);
	}

	#[test]
	fn spotlight_overrides_category_style() {
		let data = dataset();
		let spot = data.node("prof_li").unwrap();
		let style = node_style(&data, spot, Theme::Dark);
		assert_eq!(style.color, SPOTLIGHT_COLOR);
		assert_eq!(style.size, SPOTLIGHT_SIZE);
		assert!(style.show_label && style.bold && style.border);
	}

	#[test]
	fn small_nodes_hide_labels() {
		let data = dataset();
		let mut small = node("tiny", "root");
		small.symbol_size = 12.0;
		assert!(!node_style(&data, &small, Theme::Light).show_label);
		assert!(node_style(&data, data.node("root").unwrap(), Theme::Light).show_label);
	}

	#[test]
	fn theme_changes_label_color_only() {
		let data = dataset();
		let n = data.node("loss").unwrap();
		let light = node_style(&data, n, Theme::Light);
		let dark = node_style(&data, n, Theme::Dark);
		assert_eq!(light.color, dark.color);
		assert_ne!(light.label_color, dark.label_color);
		assert_eq!(Theme::Light.toggled(), Theme::Dark);
	}

	#[test]
	fn circular_layout_puts_nodes_on_one_ring() {
		let (w, h) = (800.0, 600.0);
		let expected = h * RING_SHARE;
		for i in 0..7 {
			let (x, y) = initial_position(i, 7, LayoutMode::Circular, w, h);
			assert!(((x * x + y * y).sqrt() - expected).abs() < 1e-9);
		}
		assert_eq!(initial_position(0, 0, LayoutMode::Force, w, h), (0.0, 0.0));
	}
}
