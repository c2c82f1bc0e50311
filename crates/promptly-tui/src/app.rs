//! Application state for the promptly TUI.

use promptly_widget::client::{build_request, remember_chat_id};
use promptly_widget::{
    ChatSession, ClientError, Config, ConversationRequest, ConversationResponse, CookieStore,
    Element, PendingSubmission,
};
use tracing::debug;

use crate::event::Action;
use crate::input::{wrapped_rows, TextInputState};
use crate::ui::layout::{prompt_rows, prompt_text_width, textarea_style};

/// Rows moved per scroll step.
pub const SCROLL_STEP: usize = 3;

/// Cookie store the app can hand across the event loop.
pub type SharedStore = Box<dyn CookieStore + Send>;

/// Main application state.
pub struct App {
    pub config: Config,
    pub session: ChatSession,
    pub input: TextInputState,
    pub cookies: SharedStore,
    /// Whether the sidebar is shown.
    pub sidebar_visible: bool,
    /// Transcript rows scrolled up from the bottom.
    pub scroll: usize,
    pub should_quit: bool,
    screen_width: u16,
}

impl App {
    /// Create the app with a cookie store.
    pub fn new(config: Config, cookies: SharedStore) -> Self {
        let textarea = Element::textarea().with_computed(textarea_style(config.max_visible_lines));
        let session = ChatSession::new(textarea).show_errors(config.show_errors);

        let mut app = Self {
            config,
            session,
            input: TextInputState::new(),
            cookies,
            sidebar_visible: true,
            scroll: 0,
            should_quit: false,
            screen_width: 80,
        };
        app.sync_textarea();
        app
    }

    /// Current conversation identifier.
    pub fn chat_id(&self) -> Option<String> {
        self.cookies.get(&self.config.cookie_name)
    }

    /// Rows the prompt box takes up.
    pub fn prompt_height(&self) -> u16 {
        prompt_rows(self.session.textarea(), self.config.max_visible_lines)
    }

    /// Record the terminal width and re-measure the prompt.
    pub fn set_screen_width(&mut self, width: u16) {
        if width != self.screen_width {
            self.screen_width = width;
            self.sync_textarea();
        }
    }

    /// Push the input content into the textarea and resize it.
    ///
    /// Measurements and computed style are taken fresh on every call. The
    /// cursor cell is measured with the text since the prompt draws it
    /// inline.
    fn sync_textarea(&mut self) {
        let width = prompt_text_width(self.screen_width, self.sidebar_visible);
        let rows = wrapped_rows(&self.input.display_text(), usize::from(width));

        let textarea = self.session.textarea_mut();
        #[allow(clippy::cast_precision_loss)]
        {
            textarea.scroll_height = rows as f64;
        }
        textarea.computed = textarea_style(self.config.max_visible_lines);

        self.session.input(self.input.content());
    }

    /// Apply a key action. Returns a request to send when the action was a
    /// non-empty submit.
    pub fn handle_action(&mut self, action: Action) -> Option<(PendingSubmission, ConversationRequest)> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => return self.submit(),
            Action::NewChat => self.new_chat(),
            Action::ToggleSidebar => {
                self.sidebar_visible = !self.sidebar_visible;
                self.sync_textarea();
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_add(SCROLL_STEP),
            Action::ScrollDown => self.scroll = self.scroll.saturating_sub(SCROLL_STEP),
            Action::Newline => self.edit(|input| input.insert('\n')),
            Action::Insert(c) => self.edit(|input| input.insert(c)),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::HistoryPrev => self.edit(TextInputState::history_prev),
            Action::HistoryNext => self.edit(TextInputState::history_next),
            Action::Left => self.edit(TextInputState::move_left),
            Action::Right => self.edit(TextInputState::move_right),
            Action::Home => self.edit(TextInputState::move_home),
            Action::End => self.edit(TextInputState::move_end),
            Action::None => {}
        }
        None
    }

    /// Insert pasted text.
    pub fn paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.edit(|input| input.insert_str(&normalized));
    }

    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        f(&mut self.input);
        self.sync_textarea();
    }

    /// Submit the current input.
    ///
    /// The textarea is left at its post-submit `initial` height until the
    /// next edit, as a page would leave it until the next input event.
    pub fn submit(&mut self) -> Option<(PendingSubmission, ConversationRequest)> {
        let pending = self.session.submit()?;
        self.input.commit(&pending.message);

        let request = build_request(&*self.cookies, &self.config.cookie_name, &pending.message);
        debug!(placeholder = pending.placeholder, "queued conversation request");

        self.follow_scroll();
        Some((pending, request))
    }

    /// Apply the outcome of an exchange.
    pub fn complete(
        &mut self,
        pending: &PendingSubmission,
        result: Result<ConversationResponse, ClientError>,
    ) {
        match result {
            Ok(response) => {
                remember_chat_id(
                    &mut *self.cookies,
                    &self.config.cookie_name,
                    &response,
                    self.config.cookie_ttl(),
                );
                self.session.resolve(pending, &response);
            }
            Err(e) => self.session.fail(pending, &e),
        }
        self.follow_scroll();
    }

    /// Clear the transcript and forget the conversation.
    pub fn new_chat(&mut self) {
        self.session.new_chat(&mut *self.cookies, &self.config.cookie_name);
        self.scroll = 0;
    }

    fn follow_scroll(&mut self) {
        if self.session.take_scroll_request() {
            self.scroll = 0;
        }
    }
}
