//! Canvas renderer for the knowledge graph, backed by a `force_graph` simulation.

mod component;
mod render;
mod state;

pub use component::{ForceGraphCanvas, GraphSurface, download_snapshot};
