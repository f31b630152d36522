//! Local transcript for the teaching-assistant chat. The backend only ever sees
//! the newest user message.

/// First message of every transcript.
pub const GREETING: &str = "你好！我是李玲霞的AI助教。有什么我可以帮你的吗？";
/// Reply used when the backend answered without an `answer`.
pub const NO_ANSWER_FALLBACK: &str = "抱歉，服务器暂时没有响应。";
/// Reply used when the request itself failed.
pub const TRANSPORT_FALLBACK: &str = "网络请求出错，请稍后再试。";

/// Who wrote a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
	/// The local greeting.
	System,
	/// Typed by the student.
	User,
	/// Returned by the backend.
	Assistant,
}

/// One line of the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
	/// Author.
	pub role: ChatRole,
	/// Plain text body.
	pub content: String,
}

/// Ordered chat history with at most one reply outstanding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTranscript {
	messages: Vec<ChatMessage>,
	pending: bool,
}

impl Default for ChatTranscript {
	fn default() -> Self {
		Self {
			messages: vec![ChatMessage {
				role: ChatRole::System,
				content: GREETING.into(),
			}],
			pending: false,
		}
	}
}

impl ChatTranscript {
	/// Appends the user's message and marks a reply as outstanding.
	///
	/// Returns the text to send, or `None` for blank input or while a reply is
	/// still outstanding.
	pub fn begin_send(&mut self, input: &str) -> Option<String> {
		if self.pending || input.trim().is_empty() {
			return None;
		}
		self.messages.push(ChatMessage {
			role: ChatRole::User,
			content: input.to_string(),
		});
		self.pending = true;
		Some(input.to_string())
	}

	/// Appends the assistant reply and clears the outstanding flag.
	pub fn complete(&mut self, reply: String) {
		self.messages.push(ChatMessage {
			role: ChatRole::Assistant,
			content: reply,
		});
		self.pending = false;
	}

	/// All messages, oldest first.
	pub fn messages(&self) -> &[ChatMessage] {
		&self.messages
	}

	/// True while a reply is outstanding.
	pub fn is_pending(&self) -> bool {
		self.pending
	}
}
