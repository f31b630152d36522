//! Transient user-facing messages and the wording for each core outcome.

use crate::error::{LoadError, QuizError};
use crate::quiz::AnswerOutcome;

/// Severity of a notice, which picks its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	/// Green.
	Success,
	/// Amber.
	Warning,
	/// Red.
	Error,
}

impl NoticeLevel {
	/// CSS classes for the notice box.
	pub fn class(self) -> &'static str {
		match self {
			Self::Success => "notice notice-success",
			Self::Warning => "notice notice-warning",
			Self::Error => "notice notice-error",
		}
	}
}

/// One message shown in the notice stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	/// Severity.
	pub level: NoticeLevel,
	/// Text shown to the user.
	pub text: String,
}

impl Notice {
	/// A success notice.
	pub fn success(text: impl Into<String>) -> Self {
		Self { level: NoticeLevel::Success, text: text.into() }
	}

	/// A warning notice.
	pub fn warning(text: impl Into<String>) -> Self {
		Self { level: NoticeLevel::Warning, text: text.into() }
	}

	/// An error notice.
	pub fn error(text: impl Into<String>) -> Self {
		Self { level: NoticeLevel::Error, text: text.into() }
	}

	/// Notice for a failed graph load.
	pub fn graph_load(err: &LoadError) -> Self {
		if err.is_network() {
			Self::error("网络请求失败，请检查网络或服务器状态")
		} else {
			Self::error(format!("数据加载失败: {err}"))
		}
	}

	/// Notice for a failed question bank load. The graph stays usable.
	pub fn quiz_load(err: &LoadError) -> Self {
		if err.is_network() {
			Self::warning("题库加载失败，请检查网络或服务器状态")
		} else {
			Self::warning(format!("题库加载失败: {err}"))
		}
	}

	/// `None` for outcomes that need no feedback.
	pub fn for_quiz_error(err: &QuizError) -> Option<Self> {
		match err {
			QuizError::BankEmpty => Some(Self::warning("题库加载中或暂无题目")),
			QuizError::SectionEmpty(_) => Some(Self::warning("该章节暂无题目")),
			QuizError::EmptyAnswer => Some(Self::warning("请输入答案")),
			QuizError::AlreadySolved | QuizError::NoActiveQuestion | QuizError::WrongKind(_) => None,
		}
	}

	/// Feedback for a graded answer. Wrong fill answers show the expected text.
	pub fn for_answer(outcome: &AnswerOutcome) -> Self {
		match outcome {
			AnswerOutcome::Correct { points } => Self::success(format!("回答正确！+{points}分")),
			AnswerOutcome::Incorrect { expected: Some(answer) } => {
				Self::error(format!("回答错误，正确答案是：{answer}"))
			}
			AnswerOutcome::Incorrect { expected: None } => Self::error("回答错误，请重试"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quiz_validation_becomes_warning() {
		let n = Notice::for_quiz_error(&QuizError::SectionEmpty("B".into())).unwrap();
		assert_eq!(n, Notice::warning("该章节暂无题目"));
		assert_eq!(
			Notice::for_quiz_error(&QuizError::EmptyAnswer).map(|n| n.level),
			Some(NoticeLevel::Warning)
		);
		assert!(Notice::for_quiz_error(&QuizError::AlreadySolved).is_none());
	}

	#[test]
	fn answer_wording() {
		assert_eq!(
			Notice::for_answer(&AnswerOutcome::Correct { points: 10 }).text,
			"回答正确！+10分"
		);
		assert_eq!(
			Notice::for_answer(&AnswerOutcome::Incorrect { expected: Some("xy".into()) }).text,
			"回答错误，正确答案是：xy"
		);
		assert_eq!(
			Notice::for_answer(&AnswerOutcome::Incorrect { expected: None }),
			Notice::error("回答错误，请重试")
		);
	}

	#[test]
	fn backend_error_text_is_shown() {
		let n = Notice::graph_load(&LoadError::Backend("db down".into()));
		assert_eq!(n, Notice::error("数据加载失败: db down"));
		let n = Notice::graph_load(&LoadError::Status(502));
		assert_eq!(n.text, "网络请求失败，请检查网络或服务器状态");
	}

	#[test]
	fn quiz_load_failure_is_a_warning() {
		let n = Notice::quiz_load(&LoadError::Status(500));
		assert_eq!(n, Notice::warning("题库加载失败，请检查网络或服务器状态"));
		let n = Notice::quiz_load(&LoadError::Backend("Quiz data not found".into()));
		assert_eq!(n, Notice::warning("题库加载失败: Quiz data not found"));
	}
}
