//! UI building blocks composed by the pages.

pub mod chat_drawer;
pub mod detail_drawer;
pub mod force_graph;
pub mod notices;
pub mod quiz_modal;
pub mod search_box;
