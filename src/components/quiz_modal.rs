use leptos::prelude::*;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use crate::notice::Notice;
use crate::quiz::{QuestionKind, QuizSession, Scheduler, TimeoutScheduler};

/// The session as it runs in the browser.
pub type BrowserQuiz = QuizSession<StdRng, TimeoutScheduler>;

/// Everything the quiz dialog can ask of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
	Section(String),
	Choice(String),
	Fill(String),
	Reveal,
	Skip,
	Next,
	Close,
}

/// What the host has to do after an intent was applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
	pub notice: Option<Notice>,
	/// The dialog should be hidden.
	pub close: bool,
}

pub fn dispatch<R: Rng, S: Scheduler>(session: &mut QuizSession<R, S>, intent: QuizIntent) -> Reaction {
	let result = match intent {
		QuizIntent::Section(section) => session.change_section(&section).map(|_| None),
		QuizIntent::Choice(label) => session
			.select_choice(&label)
			.map(|outcome| Some(Notice::for_answer(&outcome))),
		QuizIntent::Fill(text) => session
			.submit_fill(&text)
			.map(|outcome| Some(Notice::for_answer(&outcome))),
		QuizIntent::Reveal => {
			session.reveal_answer();
			Ok(None)
		}
		QuizIntent::Skip | QuizIntent::Next => session.skip().map(|_| None),
		QuizIntent::Close => {
			session.dismiss();
			return Reaction {
				notice: None,
				close: true,
			};
		}
	};
	match result {
		Ok(notice) => Reaction {
			notice,
			close: false,
		},
		Err(err) => {
			debug!("quiz intent rejected: {err}");
			Reaction {
				notice: Notice::for_quiz_error(&err),
				close: false,
			}
		}
	}
}

fn option_class(label: &str, picked: Option<&str>, answer: &str) -> &'static str {
	match picked {
		Some(p) if p == label && p == answer => "quiz-option correct",
		Some(p) if p == label => "quiz-option wrong",
		_ => "quiz-option",
	}
}

#[component]
pub fn QuizModal(
	quiz: RwSignal<BrowserQuiz>,
	open: RwSignal<bool>,
	#[prop(into)] on_intent: Callback<QuizIntent>,
) -> impl IntoView {
	let draft = RwSignal::new(String::new());

	let draw = Memo::new(move |_| quiz.with(|q| q.draw_count()));

	// every draw starts with an empty answer box
	Effect::new(move |_| {
		draw.track();
		draft.set(String::new());
	});

	let sections = move || quiz.with(|q| q.sections());
	let submit_fill = move || on_intent.run(QuizIntent::Fill(draft.get_untracked()));

	let body = move || {
		let Some(question) = quiz.with(|q| q.current().cloned()) else {
			return ().into_any();
		};
		let (picked, solved, revealed) =
			quiz.with(|q| (q.user_answer().map(str::to_owned), q.is_solved(), q.is_revealed()));

		let answer_area = match question.kind {
			QuestionKind::Fill => view! {
				<div class="quiz-fill">
					<textarea
						placeholder="请输入答案，多个答案请用分号或空格隔开"
						prop:value=move || draft.get()
						on:input=move |ev| draft.set(event_target_value(&ev))
						on:keydown=move |ev: web_sys::KeyboardEvent| {
							if ev.key() == "Enter" && !ev.shift_key() {
								ev.prevent_default();
								submit_fill();
							}
						}
					/>
					<div class="quiz-actions">
						<button class="primary" on:click=move |_| submit_fill()>"提交答案"</button>
						<button on:click=move |_| on_intent.run(QuizIntent::Reveal)>"查看答案"</button>
						<button on:click=move |_| on_intent.run(QuizIntent::Skip)>"跳过"</button>
					</div>
					{revealed.then(|| view! {
						<div class="quiz-reveal">
							<strong>"正确答案："</strong>
							{question.answer.clone()}
						</div>
					})}
				</div>
			}
			.into_any(),
			QuestionKind::Choice => {
				let options = question
					.options
					.iter()
					.map(|opt| {
						let class = option_class(&opt.label, picked.as_deref(), &question.answer);
						let label = opt.label.clone();
						view! {
							<button
								class=class
								disabled=solved
								on:click=move |_| on_intent.run(QuizIntent::Choice(label.clone()))
							>
								<b>{format!("{}. {}", opt.label, opt.content)}</b>
							</button>
						}
					})
					.collect_view();
				let footer = picked.is_some().then(|| {
					if solved {
						view! { <button class="primary" on:click=move |_| on_intent.run(QuizIntent::Next)>"下一题"</button> }
							.into_any()
					} else {
						view! { <button on:click=move |_| on_intent.run(QuizIntent::Close)>"结束挑战"</button> }
							.into_any()
					}
				});
				view! {
					<div class="quiz-options">{options}</div>
					<div class="quiz-footer">{footer}</div>
				}
				.into_any()
			}
		};

		let kind_class = match question.kind {
			QuestionKind::Fill => "tag tag-fill",
			QuestionKind::Choice => "tag tag-choice",
		};
		view! {
			<div class="quiz-question">
				<span class="tag">{format!("题目 {}", question.id)}</span>
				<span class=kind_class>{question.kind.label()}</span>
				<span class="quiz-stem">{question.question.clone()}</span>
			</div>
			{answer_area}
		}
		.into_any()
	};

	view! {
		<Show when=move || open.get()>
			<div class="modal-mask">
				<div class="modal quiz-modal">
					<header class="modal-header">
						<span>{move || format!("知识挑战 (当前得分: {})", quiz.with(|q| q.score()))}</span>
						<button class="modal-close" on:click=move |_| on_intent.run(QuizIntent::Close)>"×"</button>
					</header>
					<select
						class="quiz-section"
						prop:value=move || quiz.with(|q| q.selected_section().to_string())
						on:change=move |ev| on_intent.run(QuizIntent::Section(event_target_value(&ev)))
					>
						<For
							each=sections
							key=|s| s.clone()
							children=|s| view! { <option value=s.clone()>{s.clone()}</option> }
						/>
					</select>
					{body}
				</div>
			</div>
		</Show>
	}
}
