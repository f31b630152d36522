//! Runtime settings for the client.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults (backend mounted under `/api` on the same origin)
//! 2. `KG_API_BASE` from the build environment
//! 3. An inline JSON block in the host page:
//!
//! ```html
//! <script id="kg-config" type="application/json">
//!   { "api_base": "https://kg.example.edu/api", "notice_ms": 4000 }
//! </script>
//! ```

use std::time::Duration;

use log::warn;
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "/api";
const CONFIG_ELEMENT_ID: &str = "kg-config";

/// Settings resolved once at startup and shared through context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Prefix for the `/graph`, `/quiz` and `/chat` endpoints, without a trailing slash.
	pub api_base: String,
	/// How long a notice stays on screen.
	pub notice_ms: u64,
}

/// Overrides as written in the page; absent keys keep the lower layer.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
	api_base: Option<String>,
	notice_ms: Option<u64>,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.into(),
			notice_ms: 3000,
		}
	}
}

impl AppConfig {
	/// Resolves the configuration for the running page.
	pub fn load() -> Self {
		let inline = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		Self::resolve(option_env!("KG_API_BASE"), inline.as_deref())
	}

	fn resolve(build_base: Option<&str>, inline: Option<&str>) -> Self {
		let mut cfg = Self::default().with_api_base(build_base);
		let Some(json) = inline.map(str::trim).filter(|j| !j.is_empty()) else {
			return cfg;
		};
		match serde_json::from_str::<ConfigOverrides>(json) {
			Ok(o) => {
				cfg = cfg.with_api_base(o.api_base.as_deref());
				cfg.notice_ms = o.notice_ms.unwrap_or(cfg.notice_ms);
			}
			Err(err) => warn!("ignoring malformed #{CONFIG_ELEMENT_ID}: {err}"),
		}
		cfg
	}

	fn with_api_base(mut self, base: Option<&str>) -> Self {
		if let Some(base) = base.map(str::trim).filter(|b| !b.is_empty()) {
			self.api_base = base.trim_end_matches('/').to_string();
		}
		self
	}

	/// Absolute URL of a backend route under the API base.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_base, path.trim_start_matches('/'))
	}

	/// How long a notice stays on screen.
	pub fn notice_duration(&self) -> Duration {
		Duration::from_millis(self.notice_ms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_backend_layout() {
		let cfg = AppConfig::resolve(None, None);
		assert_eq!(cfg, AppConfig::default());
		assert_eq!(cfg.endpoint("graph"), "/api/graph");
		assert_eq!(cfg.endpoint("/quiz"), "/api/quiz");
		assert_eq!(cfg.notice_duration(), Duration::from_millis(3000));
	}

	#[test]
	fn build_base_drops_trailing_slash() {
		let cfg = AppConfig::resolve(Some(" http://localhost:8000/ "), None);
		assert_eq!(cfg.endpoint("chat"), "http://localhost:8000/chat");

		let blank = AppConfig::resolve(Some(""), None);
		assert_eq!(blank.api_base, DEFAULT_API_BASE);
	}

	#[test]
	fn inline_block_overrides_only_given_keys() {
		let cfg = AppConfig::resolve(Some("http://build"), Some(r#"{"notice_ms": 500}"#));
		assert_eq!(cfg.notice_duration(), Duration::from_millis(500));
		assert_eq!(cfg.api_base, "http://build");
		assert_eq!(cfg.notice_ms, 500);

		let cfg = AppConfig::resolve(Some("http://build"), Some(r#"{"api_base": "/kg/"}"#));
		assert_eq!(cfg.api_base, "/kg");
	}

	#[test]
	fn advance_delay_is_not_a_setting() {
		let cfg = AppConfig::resolve(None, Some(r#"{"auto_advance_ms": 10}"#));
		assert_eq!(cfg, AppConfig::default());
	}

	#[test]
	fn malformed_inline_block_is_ignored() {
		let cfg = AppConfig::resolve(None, Some("{not json"));
		assert_eq!(cfg, AppConfig::default());
	}
}
