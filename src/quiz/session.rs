//! The quiz state machine: drawing questions, checking answers, scoring and the
//! cancellable auto-advance after a correct answer.

use std::time::Duration;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuizError;

use super::question::{QuestionKind, QuizQuestion};
use super::schedule::{AdvanceTicket, Scheduler};

/// Section value meaning "no filter".
pub const ALL_SECTIONS: &str = "全部章节";
/// Credit for the first correct answer to a question.
pub const POINTS_PER_QUESTION: u32 = 10;
/// Pause between a correct answer and the next question.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Where the current question stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuizPhase {
	/// No question on screen.
	#[default]
	Idle,
	/// A fresh question, not answered yet.
	Active,
	/// Solved; the advance is scheduled.
	Correct,
	/// Last attempt was wrong; more attempts allowed.
	Incorrect,
}

/// Result of an answer attempt that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
	/// Credited for the first time.
	Correct {
		/// Points added to the score.
		points: u32,
	},
	/// `expected` carries the stored answer for fill-in questions.
	Incorrect {
		/// Stored answer of a fill question.
		expected: Option<String>,
	},
}

struct PendingAdvance<H> {
	ticket: AdvanceTicket,
	handle: H,
}

/// Questions of `bank` that belong to `section`.
pub fn subset<'a>(bank: &'a [QuizQuestion], section: &str) -> Vec<&'a QuizQuestion> {
	bank.iter()
		.filter(|q| section == ALL_SECTIONS || q.section() == section)
		.collect()
}

/// Uniform draw from the questions of `section`.
pub fn draw<'a, R: Rng + ?Sized>(
	rng: &mut R,
	bank: &'a [QuizQuestion],
	section: &str,
) -> Option<&'a QuizQuestion> {
	subset(bank, section).choose(rng).copied()
}

/// Section choices for the dropdown: the sentinel first, then every section
/// in order of first appearance. Empty while the bank is empty.
pub fn sections(bank: &[QuizQuestion]) -> Vec<String> {
	if bank.is_empty() {
		return Vec::new();
	}
	let mut out = vec![ALL_SECTIONS.to_string()];
	for q in bank {
		if !out.iter().any(|s| s == q.section()) {
			out.push(q.section().to_string());
		}
	}
	out
}

/// One player's quiz: bank, selected section, current question and score.
///
/// At most one auto-advance is pending at a time. Any draw, close or drop
/// cancels it.
pub struct QuizSession<R, S: Scheduler> {
	bank: Vec<QuizQuestion>,
	section: String,
	current: Option<QuizQuestion>,
	user_answer: Option<String>,
	revealed: bool,
	credited: bool,
	score: u32,
	phase: QuizPhase,
	pending: Option<PendingAdvance<S::Handle>>,
	next_ticket: u64,
	draws: u64,
	rng: R,
	scheduler: S,
}

impl<R: Rng, S: Scheduler> QuizSession<R, S> {
	/// Empty bank, all sections, zero score.
	pub fn new(rng: R, scheduler: S) -> Self {
		Self {
			bank: Vec::new(),
			section: ALL_SECTIONS.to_string(),
			current: None,
			user_answer: None,
			revealed: false,
			credited: false,
			score: 0,
			phase: QuizPhase::Idle,
			pending: None,
			next_ticket: 0,
			draws: 0,
			rng,
			scheduler,
		}
	}

	/// Replaces the question bank. Any question on screen is dropped.
	pub fn load_bank(&mut self, bank: Vec<QuizQuestion>) {
		self.cancel_pending();
		self.bank = bank;
		self.clear_question();
	}

	/// Draws a new question from the selected section.
	pub fn start_quiz(&mut self) -> Result<&QuizQuestion, QuizError> {
		self.cancel_pending();
		if self.bank.is_empty() {
			self.clear_question();
			return Err(QuizError::BankEmpty);
		}
		let Some(picked) = draw(&mut self.rng, &self.bank, &self.section).cloned() else {
			self.clear_question();
			return Err(QuizError::SectionEmpty(self.section.clone()));
		};
		debug!("quiz: drew question {} from {}", picked.id, self.section);
		self.user_answer = None;
		self.revealed = false;
		self.credited = false;
		self.phase = QuizPhase::Active;
		self.draws += 1;
		Ok(&*self.current.insert(picked))
	}

	/// Selects `section` and draws from it.
	pub fn change_section(&mut self, section: &str) -> Result<&QuizQuestion, QuizError> {
		self.cancel_pending();
		self.section = section.to_string();
		self.start_quiz()
	}

	/// Same as [`start_quiz`](Self::start_quiz); skipping costs nothing.
	pub fn skip(&mut self) -> Result<&QuizQuestion, QuizError> {
		self.start_quiz()
	}

	/// Grades a choice label. Wrong picks may be retried.
	pub fn select_choice(&mut self, label: &str) -> Result<AnswerOutcome, QuizError> {
		let correct = self.check_attempt(QuestionKind::Choice, label)?;
		self.user_answer = Some(label.to_string());
		if correct {
			Ok(self.award())
		} else {
			self.phase = QuizPhase::Incorrect;
			Ok(AnswerOutcome::Incorrect { expected: None })
		}
	}

	/// Grades fill-in text. Blank input is rejected before any state changes.
	pub fn submit_fill(&mut self, text: &str) -> Result<AnswerOutcome, QuizError> {
		if text.trim().is_empty() {
			return Err(QuizError::EmptyAnswer);
		}
		let correct = self.check_attempt(QuestionKind::Fill, text)?;
		self.user_answer = Some(text.to_string());
		if correct {
			return Ok(self.award());
		}
		self.phase = QuizPhase::Incorrect;
		Ok(AnswerOutcome::Incorrect {
			expected: self.current.as_ref().map(|q| q.answer.clone()),
		})
	}

	/// Shows the stored answer. Display only, the score is untouched.
	pub fn reveal_answer(&mut self) {
		if self.current.is_some() {
			self.revealed = true;
		}
	}

	/// Called when a scheduled advance fires. Tickets other than the pending one
	/// are stale and ignored.
	pub fn fire_advance(
		&mut self,
		ticket: AdvanceTicket,
	) -> Option<Result<&QuizQuestion, QuizError>> {
		if !self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
			debug!("quiz: ignoring stale advance {ticket:?}");
			return None;
		}
		self.pending = None;
		Some(self.start_quiz())
	}

	/// Teardown when the quiz surface closes.
	pub fn dismiss(&mut self) {
		self.cancel_pending();
	}

	/// Counts successful draws. Changes on every new question, even when the
	/// same question is drawn again.
	pub fn draw_count(&self) -> u64 {
		self.draws
	}

	/// See [`sections`].
	pub fn sections(&self) -> Vec<String> {
		sections(&self.bank)
	}

	/// Current filter.
	pub fn selected_section(&self) -> &str {
		&self.section
	}

	/// Question on screen.
	pub fn current(&self) -> Option<&QuizQuestion> {
		self.current.as_ref()
	}

	/// Last submitted answer for the current question.
	pub fn user_answer(&self) -> Option<&str> {
		self.user_answer.as_deref()
	}

	/// Whether the stored answer is shown.
	pub fn is_revealed(&self) -> bool {
		self.revealed
	}

	/// The current question has been answered correctly; further answers are
	/// rejected.
	pub fn is_solved(&self) -> bool {
		self.credited
	}

	/// Points so far.
	pub fn score(&self) -> u32 {
		self.score
	}

	/// Phase of the current question.
	pub fn phase(&self) -> QuizPhase {
		self.phase
	}

	/// True while an auto-advance is scheduled.
	pub fn has_pending_advance(&self) -> bool {
		self.pending.is_some()
	}

	/// The scheduler in use.
	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	fn check_attempt(&self, kind: QuestionKind, text: &str) -> Result<bool, QuizError> {
		let question = self.current.as_ref().ok_or(QuizError::NoActiveQuestion)?;
		if question.kind != kind {
			return Err(QuizError::WrongKind(question.kind.as_str()));
		}
		if self.credited {
			return Err(QuizError::AlreadySolved);
		}
		Ok(question.accepts(text))
	}

	fn award(&mut self) -> AnswerOutcome {
		self.score += POINTS_PER_QUESTION;
		self.credited = true;
		self.phase = QuizPhase::Correct;
		self.schedule_advance();
		AnswerOutcome::Correct {
			points: POINTS_PER_QUESTION,
		}
	}

	fn schedule_advance(&mut self) {
		self.cancel_pending();
		let ticket = AdvanceTicket(self.next_ticket);
		self.next_ticket += 1;
		let handle = self.scheduler.schedule(ticket, AUTO_ADVANCE_DELAY);
		self.pending = Some(PendingAdvance { ticket, handle });
	}

	fn clear_question(&mut self) {
		self.current = None;
		self.user_answer = None;
		self.revealed = false;
		self.credited = false;
		self.phase = QuizPhase::Idle;
	}
}

impl<R, S: Scheduler> QuizSession<R, S> {
	fn cancel_pending(&mut self) {
		if let Some(p) = self.pending.take() {
			debug!("quiz: cancelling advance {:?}", p.ticket);
			self.scheduler.cancel(p.handle);
		}
	}
}

impl<R, S: Scheduler> Drop for QuizSession<R, S> {
	fn drop(&mut self) {
		self.cancel_pending();
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::quiz::QuestionId;
	use crate::quiz::question::fixtures::{choice, fill};
	use crate::quiz::schedule::manual::ManualScheduler;

	type Session = QuizSession<StdRng, ManualScheduler>;

	fn session(bank: Vec<QuizQuestion>) -> Session {
		let mut s = QuizSession::new(StdRng::seed_from_u64(7), ManualScheduler::default());
		s.load_bank(bank);
		s
	}

	fn mixed_bank() -> Vec<QuizQuestion> {
		vec![
			choice(1, Some("A"), "B"),
			choice(2, Some("A"), "C"),
			fill(3, Some("B"), "xy"),
			fill(4, None, "德拜"),
			choice(5, Some("C"), "D"),
		]
	}

	#[test]
	fn starts_idle() {
		let s = session(mixed_bank());
		assert_eq!(s.phase(), QuizPhase::Idle);
		assert!(s.current().is_none());
		assert_eq!(s.score(), 0);
		assert_eq!(s.selected_section(), ALL_SECTIONS);
	}

	#[test]
	fn empty_bank_is_reported() {
		let mut s = session(Vec::new());
		assert_eq!(s.start_quiz().unwrap_err(), QuizError::BankEmpty);
		assert!(s.current().is_none());
		assert!(s.sections().is_empty());
	}

	#[test]
	fn sections_keep_first_appearance_order() {
		let s = session(mixed_bank());
		assert_eq!(s.sections(), vec![ALL_SECTIONS, "A", "B", "默认章节", "C"]);
	}

	#[test]
	fn draws_only_from_selected_section() {
		let bank = mixed_bank();
		let mut rng = StdRng::seed_from_u64(1);
		for section in ["A", "B", "C", "默认章节"] {
			for _ in 0..50 {
				let q = draw(&mut rng, &bank, section).unwrap();
				assert_eq!(q.section(), section);
			}
		}
		assert!(draw(&mut rng, &bank, "Z").is_none());
	}

	#[test]
	fn all_sections_reaches_every_question() {
		let bank = mixed_bank();
		let mut rng = StdRng::seed_from_u64(2);
		let mut seen = std::collections::HashSet::new();
		for _ in 0..200 {
			seen.insert(draw(&mut rng, &bank, ALL_SECTIONS).unwrap().id.clone());
		}
		assert_eq!(seen.len(), bank.len());
	}

	#[test]
	fn absent_section_leaves_no_question() {
		let mut s = session(vec![choice(1, Some("A"), "B")]);
		s.start_quiz().unwrap();

		let err = s.change_section("B").unwrap_err();
		assert_eq!(err, QuizError::SectionEmpty("B".into()));
		assert!(s.current().is_none());
		assert_eq!(s.phase(), QuizPhase::Idle);

		assert_eq!(s.start_quiz().unwrap_err(), QuizError::SectionEmpty("B".into()));
		assert!(s.current().is_none());
	}

	#[test]
	fn change_section_redraws_inside_section() {
		let mut s = session(mixed_bank());
		for _ in 0..20 {
			let q = s.change_section("A").unwrap();
			assert_eq!(q.section(), "A");
			assert_eq!(s.phase(), QuizPhase::Active);
		}
	}

	#[test]
	fn correct_choice_scores_once_and_locks() {
		let mut s = session(vec![choice(1, None, "B")]);
		s.start_quiz().unwrap();

		assert_eq!(
			s.select_choice("B").unwrap(),
			AnswerOutcome::Correct { points: 10 }
		);
		assert_eq!(s.score(), 10);
		assert_eq!(s.phase(), QuizPhase::Correct);
		assert!(s.is_solved());

		assert_eq!(s.select_choice("B").unwrap_err(), QuizError::AlreadySolved);
		assert_eq!(s.select_choice("A").unwrap_err(), QuizError::AlreadySolved);
		assert_eq!(s.score(), 10);
		assert_eq!(s.user_answer(), Some("B"));
		assert_eq!(s.scheduler().scheduled.len(), 1);
	}

	#[test]
	fn wrong_choice_allows_retry() {
		let mut s = session(vec![choice(1, None, "B")]);
		s.start_quiz().unwrap();

		assert_eq!(
			s.select_choice("A").unwrap(),
			AnswerOutcome::Incorrect { expected: None }
		);
		assert_eq!(s.phase(), QuizPhase::Incorrect);
		assert_eq!(s.score(), 0);
		assert!(!s.has_pending_advance());

		assert!(matches!(s.select_choice("B"), Ok(AnswerOutcome::Correct { .. })));
		assert_eq!(s.score(), 10);
	}

	#[test]
	fn fill_answer_is_normalized_and_advances() {
		let mut s = session(vec![fill(1, None, "xy")]);
		s.start_quiz().unwrap();

		assert_eq!(
			s.submit_fill("  X, Y ").unwrap(),
			AnswerOutcome::Correct { points: 10 }
		);
		assert_eq!(s.score(), 10);
		assert!(s.has_pending_advance());
		assert_eq!(s.scheduler().scheduled, vec![(AdvanceTicket(0), AUTO_ADVANCE_DELAY)]);

		assert_eq!(s.submit_fill("xy").unwrap_err(), QuizError::AlreadySolved);
		assert_eq!(s.score(), 10);
	}

	#[test]
	fn fill_mismatch_reports_expected_answer() {
		let mut s = session(vec![fill(1, None, "德拜弛豫")]);
		s.start_quiz().unwrap();

		assert_eq!(
			s.submit_fill("洛伦兹").unwrap(),
			AnswerOutcome::Incorrect {
				expected: Some("德拜弛豫".into())
			}
		);
		assert!(!s.is_revealed());
		assert_eq!(s.score(), 0);
	}

	#[test]
	fn blank_fill_is_rejected_without_mutation() {
		let mut s = session(vec![fill(1, None, "xy")]);
		s.start_quiz().unwrap();

		assert_eq!(s.submit_fill("   \n").unwrap_err(), QuizError::EmptyAnswer);
		assert_eq!(s.user_answer(), None);
		assert_eq!(s.phase(), QuizPhase::Active);
	}

	#[test]
	fn answer_kind_must_match_question() {
		let mut s = session(vec![fill(1, None, "xy")]);
		assert_eq!(s.submit_fill("xy").unwrap_err(), QuizError::NoActiveQuestion);
		s.start_quiz().unwrap();
		assert_eq!(s.select_choice("A").unwrap_err(), QuizError::WrongKind("fill"));
	}

	#[test]
	fn reveal_is_display_only() {
		let mut s = session(vec![fill(1, None, "xy")]);
		s.reveal_answer();
		assert!(!s.is_revealed());

		s.start_quiz().unwrap();
		s.reveal_answer();
		assert!(s.is_revealed());
		assert_eq!(s.score(), 0);
		assert!(matches!(s.submit_fill("xy"), Ok(AnswerOutcome::Correct { .. })));
		assert_eq!(s.score(), 10);
	}

	#[test]
	fn fired_advance_draws_next_question() {
		let mut s = session(vec![fill(1, None, "xy")]);
		s.start_quiz().unwrap();
		s.submit_fill("xy").unwrap();

		let ticket = s.scheduler().live()[0];
		assert!(s.fire_advance(ticket).unwrap().is_ok());
		assert_eq!(s.phase(), QuizPhase::Active);
		assert!(!s.is_solved());
		assert!(!s.has_pending_advance());

		// the fresh instance can be credited again
		s.submit_fill("x y").unwrap();
		assert_eq!(s.score(), 20);
	}

	#[test]
	fn closing_cancels_pending_advance() {
		let mut s = session(vec![fill(1, None, "xy")]);
		s.start_quiz().unwrap();
		s.submit_fill("xy").unwrap();
		s.dismiss();

		assert!(!s.has_pending_advance());
		assert!(s.scheduler().live().is_empty());
		// a timer that slipped through anyway is ignored
		assert!(s.fire_advance(AdvanceTicket(0)).is_none());
		assert_eq!(s.phase(), QuizPhase::Correct);
	}

	#[test]
	fn section_change_cancels_pending_advance() {
		let mut s = session(mixed_bank());
		s.change_section("B").unwrap();
		s.submit_fill("xy").unwrap();
		let stale = s.scheduler().live()[0];

		s.change_section("A").unwrap();
		assert!(s.scheduler().live().is_empty());
		assert!(s.fire_advance(stale).is_none());
		assert_eq!(s.current().unwrap().section(), "A");
	}

	#[test]
	fn new_question_cancels_earlier_advance() {
		let mut s = session(vec![choice(1, None, "B")]);
		s.start_quiz().unwrap();
		s.select_choice("B").unwrap();
		s.start_quiz().unwrap();
		s.select_choice("B").unwrap();

		assert_eq!(s.scheduler().cancelled, vec![AdvanceTicket(0)]);
		assert_eq!(s.scheduler().live(), vec![AdvanceTicket(1)]);
		assert!(s.fire_advance(AdvanceTicket(0)).is_none());
		assert!(s.fire_advance(AdvanceTicket(1)).is_some());
	}

	#[test]
	fn skip_draws_without_penalty() {
		let mut s = session(mixed_bank());
		s.change_section("B").unwrap();
		s.submit_fill("wrong").unwrap();
		s.skip().unwrap();
		assert_eq!(s.phase(), QuizPhase::Active);
		assert_eq!(s.user_answer(), None);
		assert_eq!(s.score(), 0);
	}

	#[test]
	fn advance_uses_fixed_delay() {
		let mut s = session(vec![choice(1, None, "A")]);
		s.start_quiz().unwrap();
		s.select_choice("A").unwrap();
		assert_eq!(s.scheduler().scheduled[0].1, Duration::from_millis(1500));
	}

	#[test]
	fn redrawing_the_same_question_counts_as_new() {
		let mut s = session(vec![fill(1, None, "xy")]);
		assert_eq!(s.draw_count(), 0);
		s.start_quiz().unwrap();
		s.submit_fill("wrong").unwrap();
		let before = s.draw_count();

		s.skip().unwrap();
		assert_eq!(s.current().map(|q| q.id.clone()), Some(QuestionId::Number(1)));
		assert_eq!(s.draw_count(), before + 1);
		assert_eq!(s.user_answer(), None);

		// failed draws leave the counter alone
		let _ = s.change_section("Z");
		assert_eq!(s.draw_count(), before + 1);
	}
}
