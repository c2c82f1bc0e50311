//! promptly-tui: terminal host for the promptly chat widget
//!
//! This crate renders a chat session in the terminal:
//! - Transcript of user and assistant rows
//! - Prompt textarea that grows with its content up to a line cap
//! - Sidebar with the conversation identifier and key hints

mod app;
mod event;
mod input;
#[cfg(test)]
pub mod test_utils;
mod ui;

pub use app::App;
pub use event::{Action, Event, EventHandler};
pub use promptly_widget;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use promptly_widget::{
    ClientError, Config, ConversationResponse, CookieJar, FileCookieJar, HttpTransport,
    PendingSubmission, Transport,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use app::SharedStore;

/// An exchange in flight, keyed by the placeholder it will replace.
type ChatHandle = (
    PendingSubmission,
    JoinHandle<Result<ConversationResponse, ClientError>>,
);

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Open the configured cookie jar, or an in-memory one if that fails.
fn open_cookies(config: &Config) -> SharedStore {
    let Some(path) = config.resolved_cookie_path() else {
        warn!("no data directory; conversation will not persist");
        return Box::new(CookieJar::new());
    };
    match FileCookieJar::open(path.clone()) {
        Ok(jar) => Box::new(jar),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to open cookie jar");
            Box::new(CookieJar::new())
        }
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let cookies = open_cookies(&config);
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.base_url));
    let mut events = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config, cookies);

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(base_url = %app.config.base_url, "starting chat");
    let result = run_loop(&mut terminal, &mut app, &mut events, &transport).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    transport: &Arc<dyn Transport>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chat_handles: Vec<ChatHandle> = Vec::new();

    loop {
        app.set_screen_width(terminal.size()?.width);
        terminal.draw(|frame| ui::draw(app, frame))?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    if let Some((pending, request)) = app.handle_action(action) {
                        let transport = Arc::clone(transport);
                        let handle = tokio::spawn(async move { transport.post(&request).await });
                        chat_handles.push((pending, handle));
                    }
                }
                Event::Paste(text) => app.paste(&text),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.handle_action(Action::ScrollUp);
                    }
                    MouseEventKind::ScrollDown => {
                        app.handle_action(Action::ScrollDown);
                    }
                    _ => {}
                },
                // Width is re-read on the next draw.
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        let mut completed = Vec::new();
        for (i, (_, handle)) in chat_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            let (pending, handle) = chat_handles.remove(i);
            match handle.await {
                Ok(result) => app.complete(&pending, result),
                Err(e) => warn!(error = %e, "conversation task did not finish"),
            }
        }

        if app.should_quit {
            for (_, handle) in chat_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
