//! Cancellable deferred tasks for the quiz auto-advance.

use std::time::Duration;

use leptos::prelude::*;
use log::error;

/// Identifies one scheduled advance. The session only honours the ticket it
/// issued last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(pub u64);

/// Something that can deliver a ticket back to the session after a delay.
pub trait Scheduler {
	/// Token that cancels one scheduled task.
	type Handle;

	/// Delivers `ticket` once after `delay`.
	fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) -> Self::Handle;

	/// Guarantees the task behind `handle` will not fire. Cancelling a task that
	/// already fired is a no-op.
	fn cancel(&mut self, handle: Self::Handle);
}

/// Browser scheduler backed by `setTimeout`.
///
/// When a timeout fires its ticket is written to `fired`; the host forwards it
/// to [`QuizSession::fire_advance`](super::QuizSession::fire_advance).
#[derive(Clone, Copy)]
pub struct TimeoutScheduler {
	fired: WriteSignal<Option<AdvanceTicket>>,
}

impl TimeoutScheduler {
	/// Scheduler writing fired tickets into `fired`.
	pub fn new(fired: WriteSignal<Option<AdvanceTicket>>) -> Self {
		Self { fired }
	}
}

impl Scheduler for TimeoutScheduler {
	type Handle = Option<TimeoutHandle>;

	fn schedule(&mut self, ticket: AdvanceTicket, delay: Duration) -> Self::Handle {
		let fired = self.fired;
		match set_timeout_with_handle(move || fired.set(Some(ticket)), delay) {
			Ok(handle) => Some(handle),
			Err(err) => {
				error!("could not schedule auto-advance: {err:?}");
				None
			}
		}
	}

	fn cancel(&mut self, handle: Self::Handle) {
		if let Some(handle) = handle {
			handle.clear();
		}
	}
}
