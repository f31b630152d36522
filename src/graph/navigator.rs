//! Search, spotlight and option filtering on top of the selection tracker.

use log::debug;

use super::model::{GraphDataset, SPOTLIGHT_ID};
use super::selection::SelectionTracker;
use super::surface::RenderSurface;

/// Selects the node whose id equals `query` and focuses it on the surface.
///
/// Returns the focused index. An unknown id changes nothing.
pub fn search_and_focus<S: RenderSurface + ?Sized>(
	dataset: &GraphDataset,
	query: &str,
	tracker: &mut SelectionTracker,
	surface: &mut S,
) -> Option<usize> {
	let Some(index) = dataset.index_of(query) else {
		debug!("search miss for {query:?}");
		return None;
	};
	tracker.select(&dataset.nodes[index]);
	surface.focus_node_adjacency(index);
	Some(index)
}

/// Jumps to the spotlight node regardless of the search box.
pub fn focus_spotlight<S: RenderSurface + ?Sized>(
	dataset: &GraphDataset,
	tracker: &mut SelectionTracker,
	surface: &mut S,
) -> Option<usize> {
	search_and_focus(dataset, SPOTLIGHT_ID, tracker, surface)
}

/// Case-insensitive name filter used to narrow the search box options.
pub fn filter_options<'a>(dataset: &'a GraphDataset, input: &str) -> Vec<(&'a str, &'a str)> {
	let needle = input.trim().to_lowercase();
	dataset
		.nodes
		.iter()
		.filter(|n| needle.is_empty() || n.name.to_lowercase().contains(&needle))
		.map(|n| (n.id.as_str(), n.name.as_str()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::model::fixtures::dataset;
	use crate::graph::surface::recording::{Instruction, RecordingSurface};

	#[test]
	fn hit_selects_then_focuses_by_index() {
		let data = dataset();
		let mut tracker = SelectionTracker::new();
		let mut surface = RecordingSurface::default();

		let idx = search_and_focus(&data, "loss", &mut tracker, &mut surface);
		assert_eq!(idx, Some(2));
		assert_eq!(tracker.current().map(|n| n.id.as_str()), Some("loss"));
		assert!(tracker.is_detail_open());
		assert_eq!(surface.instructions, vec![Instruction::Focus(2)]);
	}

	#[test]
	fn miss_changes_nothing() {
		let data = dataset();
		let mut tracker = SelectionTracker::new();
		let mut surface = RecordingSurface::default();
		search_and_focus(&data, "root", &mut tracker, &mut surface);
		let before = tracker.clone();
		surface.instructions.clear();

		assert_eq!(search_and_focus(&data, "Root", &mut tracker, &mut surface), None);
		assert_eq!(search_and_focus(&data, "nope", &mut tracker, &mut surface), None);
		assert_eq!(tracker, before);
		assert!(surface.instructions.is_empty());
	}

	#[test]
	fn spotlight_shortcut() {
		let data = dataset();
		let mut tracker = SelectionTracker::new();
		let mut surface = RecordingSurface::default();

		assert_eq!(focus_spotlight(&data, &mut tracker, &mut surface), Some(3));
		assert!(tracker.current().is_some_and(|n| n.is_spotlight()));
	}

	#[test]
	fn spotlight_missing_from_dataset_is_silent() {
		let mut data = dataset();
		data.nodes.retain(|n| !n.is_spotlight());
		let mut tracker = SelectionTracker::new();
		let mut surface = RecordingSurface::default();

		assert_eq!(focus_spotlight(&data, &mut tracker, &mut surface), None);
		assert!(tracker.current().is_none());
		assert!(surface.instructions.is_empty());
	}

	#[test]
	fn option_filter_matches_names_only() {
		let data = dataset();
		let all = filter_options(&data, "  ");
		assert_eq!(all.len(), 4);

		let hits = filter_options(&data, "POLAR");
		assert_eq!(hits, vec![("polarization", "polarization name")]);
	}
}
