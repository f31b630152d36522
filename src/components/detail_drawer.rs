use leptos::prelude::*;

use crate::graph::{Node, SelectionTracker};

/// Section headings differ for people and for concepts.
fn headings(node: &Node) -> (&'static str, &'static str) {
	if node.category == "expert" {
		("个人简介", "详细介绍")
	} else {
		("定义与概念", "详细机制与说明")
	}
}

fn paragraphs(text: &str) -> impl IntoView + use<> {
	text.split("\n\n")
		.map(str::trim)
		.filter(|p| !p.is_empty())
		.map(|p| view! { <p>{p.to_string()}</p> })
		.collect_view()
}

fn node_details(node: Node) -> impl IntoView {
	let (intro, more) = headings(&node);
	let spotlight = node.is_spotlight();
	let Node { name, category, description, formula, details, image, .. } = node;
	let title_class = if spotlight { "node-title spotlight" } else { "node-title" };
	let image = image.map(|src| {
		let alt = name.clone();
		view! {
			<div class="node-image-container">
				<img class="node-image" src=src alt=alt />
			</div>
		}
	});
	view! {
		<div class="node-header">
			<span class="tag node-category-tag">{category}</span>
			{spotlight.then(|| view! { <span class="tag spotlight-tag">"⭐ 课题组负责人"</span> })}
			<h2 class=title_class>{name}</h2>
			{image}
		</div>
		{description.map(|text| view! {
			<section class="detail-section">
				<div class="section-title">{intro}</div>
				<div class="markdown-content">{paragraphs(&text)}</div>
			</section>
		})}
		{formula.map(|formula| view! {
			<section class="detail-section">
				<div class="section-title">"核心公式"</div>
				<pre class="formula-container">{formula}</pre>
			</section>
		})}
		{details.map(|text| view! {
			<section class="detail-section">
				<div class="section-title">{more}</div>
				<div class="markdown-content">{paragraphs(&text)}</div>
			</section>
		})}
	}
}

/// Side panel with the selected node and the recently viewed list.
#[component]
pub fn DetailDrawer(
	tracker: RwSignal<SelectionTracker>,
	#[prop(into)] on_close: Callback<()>,
	/// Receives the id of a clicked history entry.
	#[prop(into)]
	on_history: Callback<String>,
) -> impl IntoView {
	let history = move || {
		tracker.with(|t| {
			t.history()
				.iter()
				.map(|n| (n.id.clone(), n.name.clone()))
				.collect::<Vec<_>>()
		})
	};

	view! {
		<Show when=move || tracker.with(|t| t.is_detail_open())>
			<aside class="drawer detail-drawer">
				<button class="drawer-close" on:click=move |_| on_close.run(())>"×"</button>
				{move || match tracker.with(|t| t.current().cloned()) {
					Some(node) => node_details(node).into_any(),
					None => view! { <p class="empty">"请选择一个节点查看详情"</p> }.into_any(),
				}}
				<Show when=move || tracker.with(|t| !t.history().is_empty())>
					<section class="detail-section history">
						<div class="section-title">"最近浏览"</div>
						<div class="history-tags">
							<For
								each=history
								key=|(id, _)| id.clone()
								children=move |(id, name)| {
									view! {
										<span class="tag history-tag" on:click=move |_| on_history.run(id.clone())>
											{name}
										</span>
									}
								}
							/>
						</div>
					</section>
				</Show>
			</aside>
		</Show>
	}
}
