//! Error types shared by the graph store, the quiz engine and the fetch layer.

use thiserror::Error;

/// A dataset that breaks one of the graph's referential rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// Two nodes share an id.
	#[error("duplicate node id: {0}")]
	DuplicateNode(String),

	/// An edge endpoint names no node.
	#[error("edge {from} -> {to} references unknown node {missing}")]
	DanglingEdge {
		/// Source id of the edge.
		from: String,
		/// Target id of the edge.
		to: String,
		/// The endpoint that was not found.
		missing: String,
	},

	/// A node's category is missing from the category list.
	#[error("node {node} uses undeclared category {category}")]
	UnknownCategory {
		/// Offending node id.
		node: String,
		/// The undeclared category name.
		category: String,
	},
}

/// Failure to obtain a usable graph or quiz payload.
#[derive(Error, Debug)]
pub enum LoadError {
	/// No response arrived.
	#[error("request failed: {0}")]
	Transport(#[from] gloo_net::Error),

	/// Any non-2xx status.
	#[error("unexpected HTTP status {0}")]
	Status(u16),

	/// The backend answered but reported an error in the body.
	#[error("{0}")]
	Backend(String),

	/// The body was not the expected JSON.
	#[error("malformed payload: {0}")]
	Decode(#[from] serde_json::Error),
}

impl LoadError {
	/// True when the request never produced a response body we could inspect.
	pub fn is_network(&self) -> bool {
		matches!(self, Self::Transport(_) | Self::Status(_))
	}
}

/// Validation failures raised by the quiz session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
	/// Nothing has been loaded yet, or the bank was empty.
	#[error("question bank is empty")]
	BankEmpty,

	/// The chosen section holds no questions.
	#[error("no questions in section {0}")]
	SectionEmpty(String),

	/// An answer arrived with no question drawn.
	#[error("no question is active")]
	NoActiveQuestion,

	/// A choice answer for a fill question or the reverse.
	#[error("operation does not apply to a {0} question")]
	WrongKind(&'static str),

	/// Blank fill-in input.
	#[error("answer is empty")]
	EmptyAnswer,

	/// The current question was already answered correctly.
	#[error("question already solved")]
	AlreadySolved,
}

/// The rendering surface could not carry out an instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
	/// The canvas is not in the DOM yet.
	#[error("rendering surface is not mounted")]
	Unmounted,

	/// The canvas refused to encode an image.
	#[error("snapshot export failed: {0}")]
	Export(String),
}
