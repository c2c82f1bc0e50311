//! Chat session state.
//!
//! Everything a host does in response to input, submit and response events,
//! kept independent of how those events are delivered. The host owns the
//! session, feeds it key presses and text edits, runs the network exchange
//! for each [`PendingSubmission`] and reports the outcome back.

use tracing::{debug, warn};

use crate::autosize::resize;
use crate::chat_row::{row_role, ChatEntry, Role};
use crate::client::{ClientError, ConversationResponse};
use crate::cookie::CookieStore;
use crate::element::Element;
use crate::node::Node;

/// Text of the row shown while a response is outstanding.
pub const PLACEHOLDER_TEXT: &str = "Waiting for server response";

/// Attribute marking rows that are not part of the conversation proper.
pub const STATE_ATTRIBUTE: &str = "data-entry-state";

/// Inline height written to the textarea after a submit.
pub const HEIGHT_INITIAL: &str = "initial";

/// Identifier of a row in the output container.
pub type RowId = u64;

/// A rendered row and its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRow {
    pub id: RowId,
    pub node: Node,
}

impl ChatRow {
    pub fn role(&self) -> Option<Role> {
        row_role(&self.node)
    }

    pub fn text(&self) -> String {
        self.node.text_content()
    }

    /// Whether this row is a pending-response placeholder.
    pub fn is_pending(&self) -> bool {
        self.node.attribute(STATE_ATTRIBUTE) == Some("pending")
    }

    /// Whether this row reports a failed exchange.
    pub fn is_error(&self) -> bool {
        self.node.attribute(STATE_ATTRIBUTE) == Some("error")
    }
}

/// A submitted message awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub placeholder: RowId,
    pub message: String,
}

/// Key press relevant to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub enter: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self {
            enter: true,
            shift: false,
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            enter: true,
            shift: true,
        }
    }
}

/// Enter without Shift submits; Shift+Enter is a newline.
pub fn should_submit(key: KeyPress) -> bool {
    key.enter && !key.shift
}

/// Textarea plus output container for one chat view.
#[derive(Debug, Clone)]
pub struct ChatSession {
    textarea: Element,
    rows: Vec<ChatRow>,
    next_id: RowId,
    show_errors: bool,
    scroll_to_bottom: bool,
}

impl ChatSession {
    /// Create a session around a textarea element.
    pub fn new(textarea: Element) -> Self {
        Self {
            textarea,
            rows: Vec::new(),
            next_id: 0,
            show_errors: false,
            scroll_to_bottom: false,
        }
    }

    /// Render a visible error row when an exchange fails.
    #[must_use]
    pub fn show_errors(mut self, show: bool) -> Self {
        self.show_errors = show;
        self
    }

    pub fn textarea(&self) -> &Element {
        &self.textarea
    }

    /// Mutable access for hosts refreshing layout measurements.
    pub fn textarea_mut(&mut self) -> &mut Element {
        &mut self.textarea
    }

    pub fn rows(&self) -> &[ChatRow] {
        &self.rows
    }

    /// Number of outstanding placeholders.
    pub fn pending_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_pending()).count()
    }

    /// Take the scroll-to-bottom request raised by the last append.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }

    /// Replace the textarea value and resize it.
    pub fn input(&mut self, value: impl Into<String>) {
        self.textarea.value = value.into();
        resize(&mut self.textarea);
    }

    /// Submit the current textarea value.
    ///
    /// Empty input is ignored. Otherwise the textarea is cleared, the user
    /// row and a placeholder are appended, and the caller is handed the
    /// message to send.
    pub fn submit(&mut self) -> Option<PendingSubmission> {
        if self.textarea.value.is_empty() {
            return None;
        }

        let message = std::mem::take(&mut self.textarea.value);
        self.textarea.style.height = HEIGHT_INITIAL.to_string();

        self.append(ChatEntry::user(message.as_str()).into_row());
        let placeholder = self.append(
            ChatEntry::assistant(PLACEHOLDER_TEXT)
                .into_row()
                .attr(STATE_ATTRIBUTE, "pending"),
        );
        self.scroll_to_bottom = true;

        debug!(placeholder, "submitted message");
        Some(PendingSubmission {
            placeholder,
            message,
        })
    }

    /// Replace a placeholder with the server's reply.
    pub fn resolve(&mut self, pending: &PendingSubmission, response: &ConversationResponse) {
        self.remove(pending.placeholder);
        self.append(ChatEntry::assistant(response.message.as_str()).into_row());
        self.scroll_to_bottom = true;
    }

    /// Drop a placeholder after a failed exchange.
    pub fn fail(&mut self, pending: &PendingSubmission, error: &ClientError) {
        warn!(placeholder = pending.placeholder, error = %error, "exchange failed");
        self.remove(pending.placeholder);
        if self.show_errors {
            self.append(
                ChatEntry::assistant(format!("Error: {error}"))
                    .into_row()
                    .attr(STATE_ATTRIBUTE, "error"),
            );
            self.scroll_to_bottom = true;
        }
    }

    /// Start a new conversation: clear the rows and forget the identifier.
    pub fn new_chat(&mut self, store: &mut dyn CookieStore, cookie_name: &str) {
        self.rows.clear();
        store.remove(cookie_name);
    }

    fn append(&mut self, node: Node) -> RowId {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(ChatRow { id, node });
        id
    }

    fn remove(&mut self, id: RowId) {
        self.rows.retain(|row| row.id != id);
    }
}
