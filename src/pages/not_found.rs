use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"页面不存在"</h1>
			<A href="/">"返回知识图谱"</A>
		</div>
	}
}
