//! Instructions the exploration core sends to whatever draws the graph.

use crate::error::SurfaceError;

use super::model::GraphDataset;
use super::style::{LayoutMode, Theme};

/// A drawing target for the knowledge graph.
///
/// The canvas component implements this for the browser; tests use a recorder.
pub trait RenderSurface {
	/// (Re)builds the picture for `dataset`. Layout and theme only affect
	/// presentation.
	fn render_graph(&mut self, dataset: &GraphDataset, layout: LayoutMode, theme: Theme);

	/// Highlights the node at `index` (dataset order) and its direct neighbors.
	fn focus_node_adjacency(&mut self, index: usize);

	/// Resets zoom, pan and any focus highlight.
	fn restore_view(&mut self);

	/// Encodes the current picture as a PNG data URL.
	fn export_snapshot(&self) -> Result<String, SurfaceError>;
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Instruction {
		Render { nodes: usize, layout: LayoutMode, theme: Theme },
		Focus(usize),
		Restore,
	}

	/// Surface that only remembers what it was told to do.
	#[derive(Default)]
	pub struct RecordingSurface {
		pub instructions: Vec<Instruction>,
	}

	impl RenderSurface for RecordingSurface {
		fn render_graph(&mut self, dataset: &GraphDataset, layout: LayoutMode, theme: Theme) {
			self.instructions.push(Instruction::Render {
				nodes: dataset.nodes.len(),
				layout,
				theme,
			});
		}

		fn focus_node_adjacency(&mut self, index: usize) {
			self.instructions.push(Instruction::Focus(index));
		}

		fn restore_view(&mut self) {
			self.instructions.push(Instruction::Restore);
		}

		fn export_snapshot(&self) -> Result<String, SurfaceError> {
			Ok("data:image/png;base64,".into())
		}
	}
}
