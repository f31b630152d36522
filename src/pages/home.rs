//! The explorer page: graph canvas, header controls and every overlay.
//!
//! This is where user intents are routed into the graph and quiz cores.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Body;
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api;
use crate::components::chat_drawer::ChatDrawer;
use crate::components::detail_drawer::DetailDrawer;
use crate::components::force_graph::{ForceGraphCanvas, GraphSurface, download_snapshot};
use crate::components::notices::{NoticeBoard, use_notices};
use crate::components::quiz_modal::{BrowserQuiz, QuizIntent, QuizModal, dispatch};
use crate::components::search_box::SearchBox;
use crate::config::AppConfig;
use crate::graph::navigator::{focus_spotlight, search_and_focus};
use crate::graph::style::legend;
use crate::graph::{GraphLoad, LayoutMode, RenderSurface, SelectionTracker, Theme};
use crate::notice::Notice;
use crate::quiz::audit::audit;
use crate::quiz::{AdvanceTicket, TimeoutScheduler};

const EXPORT_FILE_NAME: &str = "电介质物理知识图谱.png";

#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let notices = use_notices();

	let graph = RwSignal::new(GraphLoad::Loading);
	let tracker = RwSignal::new(SelectionTracker::new());
	let layout = RwSignal::new(LayoutMode::Force);
	let theme = RwSignal::new(Theme::Light);
	let quiz_open = RwSignal::new(false);
	let chat_open = RwSignal::new(false);
	let (fired, set_fired) = signal(None::<AdvanceTicket>);
	let quiz = RwSignal::new(BrowserQuiz::new(
		StdRng::from_entropy(),
		TimeoutScheduler::new(set_fired),
	));
	let surface = StoredValue::new_local(GraphSurface::default());

	let cfg = config.clone();
	spawn_local(async move {
		match api::fetch_graph(&cfg).await {
			Ok(data) => {
				for problem in data.validate() {
					warn!("graph: {problem}");
				}
				graph.set(GraphLoad::Ready(data));
			}
			Err(err) => {
				error!("graph load failed: {err}");
				notices.push(Notice::graph_load(&err));
				graph.set(GraphLoad::Failed);
			}
		}
	});

	spawn_local(async move {
		match api::fetch_quiz(&config).await {
			Ok(Some(bank)) => {
				for finding in audit(&bank) {
					warn!("quiz bank: {finding}");
				}
				info!("quiz bank loaded: {} questions", bank.len());
				quiz.update(|q| q.load_bank(bank));
			}
			Ok(None) => warn!("quiz endpoint did not return a question list"),
			Err(err) => {
				error!("quiz load failed: {err}");
				notices.push(Notice::quiz_load(&err));
			}
		}
	});

	// layout and theme changes redraw the whole graph
	Effect::new(move |_| {
		let (layout, theme) = (layout.get(), theme.get());
		graph.with(|g| {
			if let Some(data) = g.dataset() {
				surface.get_value().render_graph(data, layout, theme);
			}
		});
	});

	Effect::new(move |_| {
		let Some(ticket) = fired.get() else {
			return;
		};
		let outcome = quiz
			.try_update(|q| q.fire_advance(ticket).map(|r| r.map(|_| ())))
			.flatten();
		if let Some(Err(err)) = outcome {
			if let Some(notice) = Notice::for_quiz_error(&err) {
				notices.push(notice);
			}
		}
	});

	let on_node_click = Callback::new(move |index: usize| {
		graph.with_untracked(|g| {
			if let Some(node) = g.dataset().and_then(|d| d.nodes.get(index)) {
				tracker.update(|t| t.select(node));
			}
		});
	});

	let focus_node = Callback::new(move |id: String| {
		let mut target = surface.get_value();
		graph.with_untracked(|g| {
			if let Some(data) = g.dataset() {
				tracker.update(|t| {
					search_and_focus(data, &id, t, &mut target);
				});
			}
		});
	});

	let on_spotlight = move |_| {
		let mut target = surface.get_value();
		graph.with_untracked(|g| {
			if let Some(data) = g.dataset() {
				tracker.update(|t| {
					focus_spotlight(data, t, &mut target);
				});
			}
		});
	};

	let on_start_quiz = move |_| match quiz.try_update(|q| q.start_quiz().map(|_| ())) {
		Some(Ok(())) => quiz_open.set(true),
		Some(Err(err)) => {
			if let Some(notice) = Notice::for_quiz_error(&err) {
				notices.push(notice);
			}
		}
		None => {}
	};

	let on_quiz_intent = Callback::new(move |intent: QuizIntent| {
		let Some(reaction) = quiz.try_update(|q| dispatch(q, intent)) else {
			return;
		};
		if let Some(notice) = reaction.notice {
			notices.push(notice);
		}
		if reaction.close {
			quiz_open.set(false);
		}
	});

	let on_reset = move |_| {
		surface.get_value().restore_view();
		notices.push(Notice::success("视图已重置"));
	};

	let on_export = move |_| match download_snapshot(&surface.get_value(), EXPORT_FILE_NAME) {
		Ok(()) => notices.push(Notice::success("图谱导出成功")),
		Err(err) => {
			error!("export failed: {err}");
			notices.push(Notice::error(format!("导出失败: {err}")));
		}
	};

	let stats = move || {
		graph.with(|g| {
			g.dataset().map(|d| {
				let s = d.stats();
				format!("节点 {} · 关系 {} · 分类 {}", s.nodes, s.relations, s.categories)
			})
		})
	};

	let legend_entries = move || {
		graph.with(|g| {
			g.dataset()
				.map(|d| {
					legend(d)
						.into_iter()
						.map(|(name, color)| (name.to_string(), color))
						.collect::<Vec<_>>()
				})
				.unwrap_or_default()
		})
	};

	let layout_button = move |mode: LayoutMode| {
		view! {
			<button
				class=move || if layout.get() == mode { "segment active" } else { "segment" }
				on:click=move |_| layout.set(mode)
			>
				{mode.label()}
			</button>
		}
	};

	view! {
		<Body attr:data-theme=move || theme.get().as_attr() />

		<div class="app-layout">
			<header class="app-header">
				<div class="header-title">
					<h1>"电介质物理知识图谱"</h1>
					<div class="header-subtitle">"天津大学 · " <b>"李玲霞"</b></div>
					<div class="header-stats">{stats}</div>
				</div>
				<div class="header-controls">
					<div class="segmented">
						{layout_button(LayoutMode::Force)}
						{layout_button(LayoutMode::Circular)}
					</div>
					<button class="spotlight-button" on:click=on_spotlight>"李玲霞教授"</button>
					<button class="ghost" on:click=on_start_quiz>"知识测验"</button>
					<button class="theme-switch" on:click=move |_| theme.update(|t| *t = t.toggled())>
						{move || match theme.get() {
							Theme::Light => "☀",
							Theme::Dark => "🌙",
						}}
					</button>
					<SearchBox graph=graph on_pick=focus_node />
				</div>
			</header>

			<main class="app-content">
				<div class="chart-container">
					<ForceGraphCanvas surface=surface.get_value() on_node_click=on_node_click />
					<ul class="legend">
						<For
							each=legend_entries
							key=|(name, _)| name.clone()
							children=|(name, color)| {
								view! {
									<li>
										<span class="legend-dot" style=format!("background: {color}")></span>
										{name}
									</li>
								}
							}
						/>
					</ul>
					<Show when=move || graph.with(|g| matches!(g, GraphLoad::Loading))>
						<div class="loading-container">"正在构建知识图谱..."</div>
					</Show>
					<Show when=move || graph.with(|g| matches!(g, GraphLoad::Failed))>
						<div class="loading-container failed">"知识图谱构建失败"</div>
					</Show>
				</div>

				<DetailDrawer
					tracker=tracker
					on_close=move |()| tracker.update(|t| t.close_detail())
					on_history=focus_node
				/>

				<div class="float-group">
					<button class="float-button" title="重置视图" on:click=on_reset>"⟲"</button>
					<button class="float-button" title="导出图片" on:click=on_export>"📷"</button>
				</div>
				<button class="float-button ai-chat-button" title="李玲霞的AI助教" on:click=move |_| chat_open.set(true)>
					"🤖"
				</button>

				<ChatDrawer open=chat_open />
				<QuizModal quiz=quiz open=quiz_open on_intent=on_quiz_intent />
			</main>

			<NoticeBoard />
		</div>
	}
}
