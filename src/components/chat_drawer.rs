use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::chat::{ChatRole, ChatTranscript};
use crate::config::AppConfig;

fn bubble_class(role: ChatRole) -> &'static str {
	match role {
		ChatRole::User => "chat-bubble user",
		ChatRole::Assistant | ChatRole::System => "chat-bubble assistant",
	}
}

/// Teaching-assistant conversation. Only the newest message goes to the backend.
#[component]
pub fn ChatDrawer(open: RwSignal<bool>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let transcript = RwSignal::new(ChatTranscript::default());
	let input = RwSignal::new(String::new());
	let pending = move || transcript.with(|t| t.is_pending());

	let send = Callback::new(move |()| {
		let Some(message) = transcript
			.try_update(|t| t.begin_send(&input.get_untracked()))
			.flatten()
		else {
			return;
		};
		input.set(String::new());
		let config = config.clone();
		spawn_local(async move {
			let reply = api::send_chat(&config, &message).await;
			transcript.update(|t| t.complete(reply));
		});
	});

	view! {
		<Show when=move || open.get()>
			<aside class="drawer chat-drawer">
				<header class="drawer-header">
					<span>"李玲霞的AI助教"</span>
					<button class="drawer-close" on:click=move |_| open.set(false)>"×"</button>
				</header>
				<div class="chat-log">
					{move || {
						transcript
							.with(|t| t.messages().to_vec())
							.into_iter()
							.map(|m| view! { <div class=bubble_class(m.role)>{m.content}</div> })
							.collect_view()
					}}
					<Show when=pending>
						<div class="chat-thinking">"思考中..."</div>
					</Show>
				</div>
				<div class="chat-input">
					<input
						type="text"
						placeholder="问问AI关于电介质的问题..."
						prop:value=move || input.get()
						prop:disabled=pending
						on:input=move |ev| input.set(event_target_value(&ev))
						on:keydown=move |ev: web_sys::KeyboardEvent| {
							if ev.key() == "Enter" {
								send.run(());
							}
						}
					/>
					<button class="primary" disabled=pending on:click=move |_| send.run(())>
						"发送"
					</button>
				</div>
			</aside>
		</Show>
	}
}
