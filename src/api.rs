//! One-shot requests to the knowledge-graph backend.
//!
//! Every request completes exactly once; the body parsers are separate so the
//! payload rules can be checked without a network.

use gloo_net::http::Request;
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::{NO_ANSWER_FALLBACK, TRANSPORT_FALLBACK};
use crate::config::AppConfig;
use crate::error::LoadError;
use crate::graph::GraphDataset;
use crate::quiz::QuizQuestion;

#[derive(Serialize)]
struct ChatRequest<'a> {
	message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
	#[serde(default)]
	answer: Option<String>,
}

/// Loads the whole knowledge graph.
pub async fn fetch_graph(cfg: &AppConfig) -> Result<GraphDataset, LoadError> {
	let body = get_text(&cfg.endpoint("graph")).await?;
	let dataset = parse_graph(&body)?;
	info!(
		"graph loaded: {} nodes, {} links",
		dataset.nodes.len(),
		dataset.edges.len()
	);
	Ok(dataset)
}

/// `Ok(None)` when the backend served something other than a question list.
pub async fn fetch_quiz(cfg: &AppConfig) -> Result<Option<Vec<QuizQuestion>>, LoadError> {
	let body = get_text(&cfg.endpoint("quiz")).await?;
	parse_quiz(&body)
}

/// Sends one chat message and returns the assistant's reply, or a fallback.
pub async fn send_chat(cfg: &AppConfig, message: &str) -> String {
	match post_chat(&cfg.endpoint("chat"), message).await {
		Ok(body) => chat_reply(&body),
		Err(err) => {
			error!("chat request failed: {err}");
			TRANSPORT_FALLBACK.into()
		}
	}
}

async fn get_text(url: &str) -> Result<String, LoadError> {
	let response = Request::get(url).send().await?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	Ok(response.text().await?)
}

async fn post_chat(url: &str, message: &str) -> Result<String, LoadError> {
	let response = Request::post(url)
		.json(&ChatRequest { message })?
		.send()
		.await?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	Ok(response.text().await?)
}

/// A graph body, or the backend's `error` field when it set one.
pub fn parse_graph(body: &str) -> Result<GraphDataset, LoadError> {
	let value: Value = serde_json::from_str(body)?;
	if let Some(err) = backend_error(&value) {
		return Err(LoadError::Backend(err));
	}
	Ok(serde_json::from_value(value)?)
}

/// A question list, `None` for any other JSON shape.
pub fn parse_quiz(body: &str) -> Result<Option<Vec<QuizQuestion>>, LoadError> {
	let value: Value = serde_json::from_str(body)?;
	if !value.is_array() {
		return Ok(None);
	}
	Ok(Some(serde_json::from_value(value)?))
}

/// The reply text from a chat body. Missing or empty answers use the fallback.
pub fn chat_reply(body: &str) -> String {
	serde_json::from_str::<ChatResponse>(body)
		.ok()
		.and_then(|r| r.answer)
		.filter(|a| !a.is_empty())
		.unwrap_or_else(|| NO_ANSWER_FALLBACK.into())
}

fn backend_error(value: &Value) -> Option<String> {
	match value.get("error")? {
		Value::Null => None,
		Value::String(s) if s.is_empty() => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}
