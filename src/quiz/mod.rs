//! Quiz mini-game: question bank model, session state machine and the
//! auto-advance scheduler.

pub mod audit;
pub mod import;
pub mod question;
pub mod schedule;
pub mod session;

pub use question::{ChoiceOption, QuestionId, QuestionKind, QuizQuestion, normalize};
pub use schedule::{AdvanceTicket, Scheduler, TimeoutScheduler};
pub use session::{ALL_SECTIONS, AnswerOutcome, QuizPhase, QuizSession};
