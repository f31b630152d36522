use leptos::prelude::*;

use crate::graph::GraphLoad;
use crate::graph::navigator::filter_options;

/// Longest suggestion list shown under the box.
const MAX_SUGGESTIONS: usize = 12;

/// Node picker. Typing narrows the list by name; picking submits the node id.
#[component]
pub fn SearchBox(graph: RwSignal<GraphLoad>, #[prop(into)] on_pick: Callback<String>) -> impl IntoView {
	let text = RwSignal::new(String::new());
	let expanded = RwSignal::new(false);

	let suggestions = move || {
		let needle = text.get();
		graph.with(|g| {
			g.dataset()
				.map(|data| {
					filter_options(data, &needle)
						.into_iter()
						.take(MAX_SUGGESTIONS)
						.map(|(id, name)| (id.to_string(), name.to_string()))
						.collect::<Vec<_>>()
				})
				.unwrap_or_default()
		})
	};

	view! {
		<div class="header-search">
			<input
				type="search"
				placeholder="🔍 搜索知识点..."
				prop:value=move || text.get()
				on:input=move |ev| {
					text.set(event_target_value(&ev));
					expanded.set(true);
				}
				on:focus=move |_| expanded.set(true)
				// options react on mousedown, which lands before the blur
				on:blur=move |_| expanded.set(false)
			/>
			<Show when=move || expanded.get()>
				<ul class="search-options">
					<For
						each=suggestions
						key=|(id, _)| id.clone()
						children=move |(id, name)| {
							let label = name.clone();
							view! {
								<li on:mousedown=move |_| {
									text.set(label.clone());
									expanded.set(false);
									on_pick.run(id.clone());
								}>{name}</li>
							}
						}
					/>
				</ul>
			</Show>
		</div>
	}
}
