//! Question bank wire model and fill-in answer normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Section assigned to questions that carry none.
pub const DEFAULT_SECTION: &str = "默认章节";

/// Question id as served by the backend: the exercise number, or any string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum QuestionId {
	/// Numeric id.
	Number(u64),
	/// Free-form id.
	Text(String),
}

impl fmt::Display for QuestionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Text(s) => f.write_str(s),
		}
	}
}

/// Served as the `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
	/// Pick one labelled option.
	Choice,
	/// Type the answer.
	Fill,
}

impl QuestionKind {
	/// Wire name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Choice => "choice",
			Self::Fill => "fill",
		}
	}

	/// Tag shown next to the question text.
	pub fn label(self) -> &'static str {
		match self {
			Self::Choice => "选择题",
			Self::Fill => "填空题",
		}
	}
}

/// One option of a choice question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChoiceOption {
	/// Letter the answer refers to.
	pub label: String,
	/// Option text.
	pub content: String,
}

/// One question of the bank.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
	/// Exercise number or key.
	pub id: QuestionId,
	/// Chapter name; see [`QuizQuestion::section`].
	#[serde(default)]
	pub section: Option<String>,
	/// Choice or fill.
	#[serde(rename = "type")]
	pub kind: QuestionKind,
	/// Question text.
	pub question: String,
	/// Empty for fill questions.
	#[serde(default)]
	pub options: Vec<ChoiceOption>,
	/// Option label for choices, expected text for fills.
	pub answer: String,
}

impl QuizQuestion {
	/// Section name, or [`DEFAULT_SECTION`] when none was given.
	pub fn section(&self) -> &str {
		self.section.as_deref().unwrap_or(DEFAULT_SECTION)
	}

	/// True if `text` is an accepted answer to this question.
	///
	/// Choice answers compare labels exactly; fill answers compare after
	/// [`normalize`].
	pub fn accepts(&self, text: &str) -> bool {
		match self.kind {
			QuestionKind::Choice => text == self.answer,
			QuestionKind::Fill => normalize(text) == normalize(&self.answer),
		}
	}
}

/// Folds a fill-in answer for comparison: drops whitespace and ASCII/full-width
/// commas, semicolons and periods, then lower-cases.
pub fn normalize(text: &str) -> String {
	text.chars()
		.filter(|c| !c.is_whitespace() && !matches!(c, ',' | '，' | ';' | '；' | '.' | '。'))
		.flat_map(char::to_lowercase)
		.collect()
}


#[cfg(test)]
mod tests {
	use super::fixtures::*;
	use super::*;

	#[test]
	fn normalize_strips_separators_and_case() {
		assert_eq!(normalize("RC ; model"), normalize("rcmodel"));
		assert_eq!(normalize("  X, Y "), "xy");
		assert_eq!(normalize("极化，损耗；击穿。"), "极化损耗击穿");
		assert_eq!(normalize("A.b;C\tD\n"), "abcd");
		assert_eq!(normalize(""), "");
	}

	#[test]
	fn normalize_keeps_other_punctuation() {
		assert_eq!(normalize("tan-δ"), "tan-δ");
		assert_ne!(normalize("a:b"), normalize("ab"));
	}

	#[test]
	fn deserializes_numeric_and_text_ids() {
		let payload = serde_json::json!([
			{"id": 3, "section": "第一章", "type": "choice", "question": "q",
			 "options": [{"label": "A", "content": "x"}], "answer": "A"},
			{"id": "f-1", "type": "fill", "question": "q2", "answer": "德拜"}
		]);
		let bank: Vec<QuizQuestion> = serde_json::from_value(payload).unwrap();
		assert_eq!(bank[0].id, QuestionId::Number(3));
		assert_eq!(bank[0].section(), "第一章");
		assert_eq!(bank[1].id.to_string(), "f-1");
		assert_eq!(bank[1].kind, QuestionKind::Fill);
		assert_eq!(bank[1].section(), DEFAULT_SECTION);
		assert!(bank[1].options.is_empty());
	}

	#[test]
	fn choice_is_exact_fill_is_normalized() {
		let c = choice(1, None, "B");
		assert!(c.accepts("B"));
		assert!(!c.accepts("b"));
		assert!(!c.accepts(" B"));

		let f = fill(2, None, "xy");
		assert!(f.accepts("  X, Y "));
		assert!(!f.accepts("x y z"));
	}
}
