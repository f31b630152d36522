//! Graph payload as served by the backend, plus the store's load state.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::GraphError;

/// Id of the node that gets the spotlight treatment and its own shortcut.
pub const SPOTLIGHT_ID: &str = "prof_li";

/// A concept, experiment or person in the course graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Unique key; edges and search refer to it.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Name of one of the dataset's categories.
	pub category: String,
	/// Base circle size before theming.
	#[serde(rename = "symbolSize", default = "default_symbol_size")]
	pub symbol_size: f64,
	/// Short summary.
	#[serde(default)]
	pub description: Option<String>,
	/// Raw LaTeX.
	#[serde(default)]
	pub formula: Option<String>,
	/// Longer text; headed as achievements for experts.
	#[serde(default)]
	pub details: Option<String>,
	/// Portrait or figure URL.
	#[serde(default)]
	pub image: Option<String>,
}

fn default_symbol_size() -> f64 {
	20.0
}

impl Node {
	/// True for the one node styled and reachable as the spotlight.
	pub fn is_spotlight(&self) -> bool {
		self.id == SPOTLIGHT_ID
	}
}

/// Undirected relation between two node ids.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Edge {
	/// First endpoint; its category colors the line.
	pub source: String,
	/// Second endpoint.
	pub target: String,
}

/// A node grouping. Declaration order picks the palette color.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
	/// Name nodes refer to.
	pub name: String,
}

/// The whole graph as served by the backend. Read-only once loaded.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphDataset {
	/// Nodes in renderer order.
	pub nodes: Vec<Node>,
	/// Served as `links`.
	#[serde(rename = "links", default)]
	pub edges: Vec<Edge>,
	/// Declared categories, in palette order.
	#[serde(default)]
	pub categories: Vec<Category>,
}

/// Header counters shown next to the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	/// Node count.
	pub nodes: usize,
	/// Edge count.
	pub relations: usize,
	/// Declared category count.
	pub categories: usize,
}

impl GraphDataset {
	/// Position of the node with `id` in the node ordering used by the renderer.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Node by exact id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Declaration position of a category.
	pub fn category_index(&self, name: &str) -> Option<usize> {
		self.categories.iter().position(|c| c.name == name)
	}

	/// Counters for the header.
	pub fn stats(&self) -> GraphStats {
		GraphStats {
			nodes: self.nodes.len(),
			relations: self.edges.len(),
			categories: self.categories.len(),
		}
	}

	/// Indices of the nodes sharing an edge with `index`, in either direction.
	pub fn neighbors(&self, index: usize) -> Vec<usize> {
		let Some(node) = self.nodes.get(index) else {
			return Vec::new();
		};
		let mut out = Vec::new();
		for edge in &self.edges {
			let other = if edge.source == node.id {
				&edge.target
			} else if edge.target == node.id {
				&edge.source
			} else {
				continue;
			};
			if let Some(idx) = self.index_of(other) {
				if !out.contains(&idx) {
					out.push(idx);
				}
			}
		}
		out
	}

	/// Checks the referential rules of the dataset and returns every violation.
	pub fn validate(&self) -> Vec<GraphError> {
		let mut problems = Vec::new();
		let mut ids = HashSet::new();
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				problems.push(GraphError::DuplicateNode(node.id.clone()));
			}
		}

		let categories: HashSet<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
		for node in &self.nodes {
			if !categories.contains(node.category.as_str()) {
				problems.push(GraphError::UnknownCategory {
					node: node.id.clone(),
					category: node.category.clone(),
				});
			}
		}

		for edge in &self.edges {
			for end in [&edge.source, &edge.target] {
				if !ids.contains(end.as_str()) {
					problems.push(GraphError::DanglingEdge {
						from: edge.source.clone(),
						to: edge.target.clone(),
						missing: end.clone(),
					});
				}
			}
		}
		problems
	}
}

/// Where the graph store is in its one-shot load.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GraphLoad {
	/// Request in flight.
	#[default]
	Loading,
	/// Loaded and immutable from here on.
	Ready(GraphDataset),
	/// Terminal; there is no retry.
	Failed,
}

impl GraphLoad {
	/// The dataset once ready.
	pub fn dataset(&self) -> Option<&GraphDataset> {
		match self {
			Self::Ready(data) => Some(data),
			_ => None,
		}
	}
}


#[cfg(test)]
mod tests {
	use super::fixtures::*;
	use super::*;

	#[test]
	fn deserializes_backend_payload() {
		let payload = serde_json::json!({
			"nodes": [
				{"id": "a", "name": "A", "category": "root", "symbolSize": 50, "formula": "P = \\chi E"},
				{"id": "b", "name": "B", "category": "root", "symbolSize": 20.5}
			],
			"links": [{"source": "a", "target": "b"}],
			"categories": [{"name": "root"}]
		});
		let data: GraphDataset = serde_json::from_value(payload).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].symbol_size, 50.0);
		assert_eq!(data.nodes[0].formula.as_deref(), Some("P = \\chi E"));
		assert_eq!(data.edges[0].target, "b");
		assert!(data.validate().is_empty());
	}

	#[test]
	fn spotlight_is_derived_from_id() {
		let data = dataset();
		let spot: Vec<_> = data.nodes.iter().filter(|n| n.is_spotlight()).collect();
		assert_eq!(spot.len(), 1);
		assert_eq!(spot[0].id, SPOTLIGHT_ID);
	}

	#[test]
	fn neighbors_follow_both_directions() {
		let data = dataset();
		let polarization = data.index_of("polarization").unwrap();
		let mut n = data.neighbors(polarization);
		n.sort();
		assert_eq!(n, vec![0, 3]);
		assert!(data.neighbors(99).is_empty());
	}

	#[test]
	fn validate_reports_each_violation() {
		let mut data = dataset();
		data.nodes.push(node("loss", "phenomenon"));
		data.nodes.push(node("ghost", "nowhere"));
		data.edges.push(Edge { source: "root".into(), target: "missing".into() });

		let problems = data.validate();
		assert!(problems.contains(&GraphError::DuplicateNode("loss".into())));
		assert!(problems.contains(&GraphError::UnknownCategory {
			node: "ghost".into(),
			category: "nowhere".into(),
		}));
		assert!(problems.contains(&GraphError::DanglingEdge {
			from: "root".into(),
			to: "missing".into(),
			missing: "missing".into(),
		}));
		assert_eq!(problems.len(), 3);
	}

	#[test]
	fn stats_count_everything() {
		let stats = dataset().stats();
		assert_eq!(
			stats,
			GraphStats { nodes: 4, relations: 3, categories: 3 }
		);
	}
}
