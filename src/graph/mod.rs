//! Knowledge graph data, selection state and navigation.

pub mod model;
pub mod navigator;
pub mod selection;
pub mod style;
pub mod surface;

pub use model::{Category, Edge, GraphDataset, GraphLoad, GraphStats, Node, SPOTLIGHT_ID};
pub use selection::{History, SelectionTracker};
pub use style::{LayoutMode, Theme};
pub use surface::RenderSurface;
