//! Current selection, detail visibility and recent-views history.

use std::collections::VecDeque;

use super::model::Node;

/// Maximum number of entries kept in the recent-views list.
pub const HISTORY_LIMIT: usize = 5;

/// Recently inspected nodes, most recent first, no duplicate ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
	entries: VecDeque<Node>,
}

impl History {
	/// Moves `node` to the front, dropping an older entry with the same id.
	pub fn record(&mut self, node: Node) {
		self.entries.retain(|n| n.id != node.id);
		self.entries.push_front(node);
		self.entries.truncate(HISTORY_LIMIT);
	}

	/// Entries, most recent first.
	pub fn iter(&self) -> impl Iterator<Item = &Node> {
		self.entries.iter()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True before anything was inspected.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Which node the detail view shows and whether the view is open.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionTracker {
	current: Option<Node>,
	detail_open: bool,
	history: History,
}

impl SelectionTracker {
	/// Nothing selected, detail closed.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows `node` in the detail view and records it.
	pub fn select(&mut self, node: &Node) {
		self.current = Some(node.clone());
		self.detail_open = true;
		self.history.record(node.clone());
	}

	/// Hides the detail view. Selection and history survive.
	pub fn close_detail(&mut self) {
		self.detail_open = false;
	}

	/// Last selected node.
	pub fn current(&self) -> Option<&Node> {
		self.current.as_ref()
	}

	/// Whether the detail view is visible.
	pub fn is_detail_open(&self) -> bool {
		self.detail_open
	}

	/// Recent views.
	pub fn history(&self) -> &History {
		&self.history
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::fixtures::node;

	fn ids(history: &History) -> Vec<&str> {
		history.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn starts_empty_with_detail_closed() {
		let tracker = SelectionTracker::new();
		assert!(tracker.current().is_none());
		assert!(!tracker.is_detail_open());
		assert!(tracker.history().is_empty());
	}

	#[test]
	fn history_is_bounded_and_most_recent_first() {
		let mut history = History::default();
		for id in ["a", "b", "c", "d", "e", "f", "g"] {
			history.record(node(id, "c"));
		}
		assert_eq!(history.len(), HISTORY_LIMIT);
		assert_eq!(ids(&history), vec!["g", "f", "e", "d", "c"]);
	}

	#[test]
	fn revisit_moves_to_front_without_growing() {
		let mut history = History::default();
		for id in ["a", "b", "c"] {
			history.record(node(id, "c"));
		}
		history.record(node("a", "c"));
		assert_eq!(ids(&history), vec!["a", "c", "b"]);

		// a full list keeps its size when an existing entry is revisited
		for id in ["d", "e"] {
			history.record(node(id, "c"));
		}
		history.record(node("b", "c"));
		assert_eq!(history.len(), 5);
		assert_eq!(ids(&history), vec!["b", "e", "d", "a", "c"]);
	}

	#[test]
	fn history_ids_stay_distinct() {
		let mut history = History::default();
		for id in ["a", "b", "a", "c", "b", "b", "d", "a", "e", "f"] {
			history.record(node(id, "c"));
			let mut seen = ids(&history);
			let before = seen.len();
			seen.sort();
			seen.dedup();
			assert_eq!(seen.len(), before);
			assert!(before <= HISTORY_LIMIT);
		}
	}

	#[test]
	fn select_opens_detail_and_records() {
		let mut tracker = SelectionTracker::new();
		tracker.select(&node("a", "c"));
		tracker.select(&node("b", "c"));
		assert_eq!(tracker.current().map(|n| n.id.as_str()), Some("b"));
		assert!(tracker.is_detail_open());
		assert_eq!(ids(tracker.history()), vec!["b", "a"]);

		tracker.close_detail();
		assert!(!tracker.is_detail_open());
		assert_eq!(tracker.current().map(|n| n.id.as_str()), Some("b"));
	}
}
