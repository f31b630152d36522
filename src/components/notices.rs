use std::time::Duration;

use leptos::prelude::*;

use crate::notice::Notice;

/// Stack of transient notices, shared through context.
#[derive(Clone, Copy)]
pub struct Notices {
	items: RwSignal<Vec<(u64, Notice)>>,
	next_id: StoredValue<u64>,
	duration: Duration,
}

impl Notices {
	pub fn new(duration: Duration) -> Self {
		Self {
			items: RwSignal::new(Vec::new()),
			next_id: StoredValue::new(0),
			duration,
		}
	}

	/// Shows `notice` and removes it again after the configured duration.
	pub fn push(&self, notice: Notice) {
		let id = self.next_id.get_value();
		self.next_id.set_value(id + 1);
		self.items.update(|items| items.push((id, notice)));

		let items = self.items;
		set_timeout(
			move || items.update(|items| items.retain(|(n, _)| *n != id)),
			self.duration,
		);
	}
}

pub fn provide_notices(duration: Duration) -> Notices {
	let notices = Notices::new(duration);
	provide_context(notices);
	notices
}

pub fn use_notices() -> Notices {
	use_context::<Notices>().unwrap_or_else(|| Notices::new(Duration::from_millis(3000)))
}

#[component]
pub fn NoticeBoard() -> impl IntoView {
	let notices = use_notices();
	view! {
		<div class="notice-board">
			<For
				each=move || notices.items.get()
				key=|(id, _)| *id
				children=|(_, notice)| view! { <div class=notice.level.class()>{notice.text}</div> }
			/>
		</div>
	}
}
