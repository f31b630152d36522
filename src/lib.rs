//! Dielectric physics knowledge graph explorer with a quiz mini-game.
//!
//! The graph and quiz cores (`graph`, `quiz`, `chat`) are plain Rust and are
//! tested on the host; `components` and `pages` wire them into a Leptos CSR app.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// enables the `js` backend for rand in the browser
use getrandom as _;

// Modules
pub mod api;
pub mod chat;
mod components;
pub mod config;
pub mod error;
pub mod graph;
pub mod notice;
mod pages;
pub mod quiz;

// Top-Level pages
use crate::components::notices::provide_notices;
use crate::config::AppConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the explorer and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::load();
	info!("backend at {}", config.api_base);
	provide_notices(config.notice_duration());
	provide_context(config);

	view! {
		<Html attr:lang="zh-CN" attr:dir="ltr" />

		// sets the document title
		<Title text="电介质物理知识图谱" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
