//! Sanity checks over a freshly loaded question bank.

use std::fmt;

use super::question::{QuestionId, QuestionKind, QuizQuestion};

/// A suspicious question. Findings are logged; the bank still loads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
	/// Nothing could ever be accepted.
	EmptyFillAnswer(QuestionId),
	/// Options that will never be shown.
	FillWithOptions(QuestionId),
	/// Nothing to click.
	ChoiceWithoutOptions(QuestionId),
	/// A fill question whose answer is one character; probably a misfiled choice.
	SingleCharFill {
		/// Question id.
		id: QuestionId,
		/// The suspicious answer.
		answer: String,
	},
}

impl fmt::Display for Finding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::EmptyFillAnswer(id) => write!(f, "fill question {id} has an empty answer"),
			Self::FillWithOptions(id) => write!(f, "fill question {id} carries options"),
			Self::ChoiceWithoutOptions(id) => write!(f, "choice question {id} has no options"),
			Self::SingleCharFill { id, answer } => {
				write!(f, "fill question {id} has single-character answer {answer:?}")
			}
		}
	}
}

/// Every finding in `bank`, in bank order.
pub fn audit(bank: &[QuizQuestion]) -> Vec<Finding> {
	let mut findings = Vec::new();
	for q in bank {
		match q.kind {
			QuestionKind::Choice if q.options.is_empty() => {
				findings.push(Finding::ChoiceWithoutOptions(q.id.clone()));
			}
			QuestionKind::Choice => {}
			QuestionKind::Fill => {
				let answer = q.answer.trim();
				if answer.is_empty() {
					findings.push(Finding::EmptyFillAnswer(q.id.clone()));
				} else if answer.chars().count() == 1 {
					findings.push(Finding::SingleCharFill {
						id: q.id.clone(),
						answer: answer.to_string(),
					});
				}
				if !q.options.is_empty() {
					findings.push(Finding::FillWithOptions(q.id.clone()));
				}
			}
		}
	}
	findings
}
