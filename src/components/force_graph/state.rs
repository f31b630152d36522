use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::style::{self, NodeStyle};
use crate::graph::{GraphDataset, LayoutMode, Theme};

/// Extra pick tolerance around a node, in world units.
pub const HIT_SLACK: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub style: NodeStyle,
}

impl NodeInfo {
	pub fn radius(&self) -> f64 {
		self.style.size / 2.0
	}
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Adjacency highlight. Driven by the pointer, or pinned by a focus instruction.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	pub hovered: Option<DefaultNodeIdx>,
	pub focused: Option<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub theme: Theme,
	pub layout: LayoutMode,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	order: Vec<DefaultNodeIdx>,
	/// Neighbor lists in dataset order.
	adjacency: Vec<Vec<usize>>,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphDataset,
		layout: LayoutMode,
		theme: Theme,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 500.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.6,
		});
		let mut id_to_idx = HashMap::new();
		let mut order = Vec::with_capacity(data.nodes.len());
		let adjacency = (0..data.nodes.len()).map(|i| data.neighbors(i)).collect();

		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = style::initial_position(i, data.nodes.len(), layout, width, height);
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				// the ring layout is static; force lets the simulation move nodes
				is_anchor: layout == LayoutMode::Circular,
				user_data: NodeInfo {
					label: node.name.clone(),
					style: style::node_style(data, node, theme),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
			order.push(idx);
		}

		for link in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		Self {
			graph,
			order,
			adjacency,
			transform: Self::home_transform(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			theme,
			layout,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	fn home_transform(width: f64, height: f64) -> ViewTransform {
		ViewTransform {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius() + HIT_SLACK {
				found = Some(node.index());
			}
		});
		found
	}

	/// Dataset position of a graph node.
	pub fn dataset_index(&self, idx: DefaultNodeIdx) -> Option<usize> {
		self.order.iter().position(|&i| i == idx)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.hovered = node;
		self.apply_highlight(node.or(self.highlight.focused));
	}

	/// Pins the highlight on the node at `index` in dataset order.
	pub fn focus(&mut self, index: usize) {
		let Some(&idx) = self.order.get(index) else {
			return;
		};
		self.highlight.focused = Some(idx);
		self.apply_highlight(self.highlight.hovered.or(Some(idx)));
	}

	/// Back to the initial zoom and pan, with no highlight.
	pub fn restore(&mut self) {
		self.transform = Self::home_transform(self.width, self.height);
		self.highlight.focused = None;
		self.highlight.hovered = None;
		self.apply_highlight(None);
	}

	fn apply_highlight(&mut self, node: Option<DefaultNodeIdx>) {
		if self.highlight.node == node {
			return;
		}
		let neighbors: HashSet<DefaultNodeIdx> = node
			.and_then(|idx| self.dataset_index(idx))
			.map(|i| self.adjacency[i].iter().map(|&j| self.order[j]).collect())
			.unwrap_or_default();

		let hl = &mut self.highlight;
		let was_highlighting = hl.node.is_some();

		// keep the old set around so it can fade out
		if was_highlighting && node.is_none() {
			hl.prev_node = hl.node.take();
			hl.prev_neighbors = std::mem::take(&mut hl.neighbors);
		} else {
			hl.prev_node = None;
			hl.prev_neighbors.clear();
		}

		hl.node = node;
		hl.neighbors = neighbors;
		if node.is_some() && !was_highlighting {
			hl.delay_t = 0.0;
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		let hl = &self.highlight;
		hl.node == Some(idx)
			|| hl.neighbors.contains(&idx)
			|| hl.prev_node == Some(idx)
			|| hl.prev_neighbors.contains(&idx)
	}

	pub fn is_center(&self, idx: DefaultNodeIdx) -> bool {
		self.highlight.node == Some(idx) || self.highlight.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.highlight.node.is_some() || self.highlight.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		if self.layout == LayoutMode::Force {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;

		let hl = &mut self.highlight;
		let (target, delay, speed) = if hl.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if hl.node.is_some() {
			hl.delay_t = (hl.delay_t + dt as f64).min(delay);
			if hl.delay_t >= delay {
				hl.highlight_t += (target - hl.highlight_t) * speed * dt as f64;
			}
		} else {
			hl.highlight_t += (target - hl.highlight_t) * speed * dt as f64;
			if hl.highlight_t < 0.01 {
				hl.highlight_t = 0.0;
				hl.prev_node = None;
				hl.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
