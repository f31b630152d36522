//! Reads the course's markdown exercise sheet into a question bank.
//!
//! Recognised lines, after trimming:
//!
//! ```text
//! ## 第一章 电介质的极化          section header
//! 1. 下列哪种极化建立最快？       question (number, dot, text)
//! A. 电子位移极化 B. 离子位移极化  options, one or several per line
//! 答案：A                         answer (`：` or `:`)
//! ```
//!
//! Anything else is ignored. An answer that is not a single letter A-D turns
//! the question into a fill-in question.

use super::question::{ChoiceOption, DEFAULT_SECTION, QuestionId, QuestionKind, QuizQuestion};

/// Parses a whole sheet in reading order. A question with no answer line keeps an empty answer.
pub fn parse_markdown(source: &str) -> Vec<QuizQuestion> {
	let mut questions = Vec::new();
	let mut section = DEFAULT_SECTION.to_string();
	let mut current: Option<QuizQuestion> = None;

	for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
		if let Some(title) = section_header(line) {
			section = title.to_string();
			continue;
		}

		if let Some((id, text)) = question_line(line) {
			questions.extend(current.take());
			current = Some(QuizQuestion {
				id: QuestionId::Number(id),
				section: Some(section.clone()),
				kind: QuestionKind::Choice,
				question: text.to_string(),
				options: Vec::new(),
				answer: String::new(),
			});
			continue;
		}

		let Some(question) = current.as_mut() else {
			continue;
		};

		if let Some(answer) = answer_line(line) {
			question.answer = answer.to_string();
			if !is_choice_label(answer) {
				question.kind = QuestionKind::Fill;
			}
			continue;
		}

		question.options.extend(option_spans(line));
	}

	questions.extend(current);
	questions
}

fn section_header(line: &str) -> Option<&str> {
	let rest = line.strip_prefix("##")?;
	if !rest.starts_with(char::is_whitespace) {
		return None;
	}
	Some(rest.trim())
}

fn question_line(line: &str) -> Option<(u64, &str)> {
	let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
	if digits == 0 {
		return None;
	}
	let rest = line[digits..].strip_prefix('.')?;
	let id = line[..digits].parse().ok()?;
	Some((id, rest.trim_start()))
}

fn answer_line(line: &str) -> Option<&str> {
	let rest = line.strip_prefix("答案")?;
	let rest = rest.strip_prefix('：').or_else(|| rest.strip_prefix(':'))?;
	Some(rest.trim())
}

fn is_choice_label(answer: &str) -> bool {
	matches!(answer, "A" | "B" | "C" | "D")
}

/// Splits `A. foo B. bar` into labelled options.
fn option_spans(line: &str) -> Vec<ChoiceOption> {
	let bytes = line.as_bytes();
	// (label, start of marker, start of content)
	let mut markers = Vec::new();
	for (i, window) in bytes.windows(2).enumerate() {
		if matches!(window[0], b'A'..=b'D') && window[1] == b'.' {
			let after = i + 2;
			let content = after + (line[after..].len() - line[after..].trim_start().len());
			markers.push((window[0] as char, i, content));
		}
	}

	markers
		.iter()
		.enumerate()
		.map(|(n, &(label, _, content))| {
			let end = markers.get(n + 1).map_or(line.len(), |&(_, start, _)| start);
			ChoiceOption {
				label: label.to_string(),
				content: line[content.min(end)..end].trim().to_string(),
			}
		})
		.collect()
}
