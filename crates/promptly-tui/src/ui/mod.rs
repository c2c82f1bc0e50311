//! Rendering for the promptly TUI.

pub mod layout;
pub mod prompt;
pub mod sidebar;
pub mod theme;
pub mod transcript;

use ratatui::Frame;

use crate::app::App;
use layout::screen_areas;
use prompt::PromptInput;
use sidebar::Sidebar;
use transcript::Transcript;

/// Draw the whole screen.
pub fn draw(app: &App, frame: &mut Frame<'_>) {
    let areas = screen_areas(frame.area(), app.sidebar_visible, app.prompt_height());

    if let Some(area) = areas.sidebar {
        let chat_id = app.chat_id();
        frame.render_widget(
            Sidebar::new(chat_id.as_deref(), app.session.pending_count()),
            area,
        );
    }

    frame.render_widget(
        Transcript::new(app.session.rows()).scroll(app.scroll),
        areas.transcript,
    );
    frame.render_widget(
        PromptInput::new(&app.input, &app.session.textarea().style.overflow_y),
        areas.prompt,
    );
}

#[cfg(test)]
mod tests {
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_to_string};
    use insta::assert_snapshot;
    use promptly_widget::ConversationResponse;

    fn type_text(app: &mut crate::app::App, text: &str) {
        for c in text.chars() {
            let action = if c == '\n' { Action::Newline } else { Action::Insert(c) };
            app.handle_action(action);
        }
    }

    #[test]
    fn test_draw_empty_app() {
        let mut app = create_test_app();
        let screen = render_app_to_string(&mut app, 60, 12);
        assert_snapshot!(screen, @r"
        ┌ promptly ────────────────┐┌ Chat ────────────────────────┐
        │Conversation              ││                              │
        │(new)                     ││                              │
        │                          ││                              │
        │Enter       send          ││                              │
        │Shift+Enter newline       ││                              │
        │PgUp/PgDn   scroll        ││                              │
        │Ctrl+N      new chat      ││                              │
        │Ctrl+B      sidebar       │└──────────────────────────────┘
        │Esc         quit          │┌──────────────────────────────┐
        │                          ││> █Send a message...          │
        └──────────────────────────┘└──────────────────────────────┘
        ");
    }

    #[test]
    fn test_draw_after_exchange() {
        let mut app = create_test_app();
        type_text(&mut app, "Hello");
        let (pending, _) = app.handle_action(Action::Submit).unwrap();
        let screen = render_app_to_string(&mut app, 60, 12);
        assert_snapshot!(screen, @r"
        ┌ promptly ────────────────┐┌ Chat ────────────────────────┐
        │Conversation              ││You                           │
        │(new)                     ││  Hello                       │
        │1 awaiting reply          ││                              │
        │                          ││AI                            │
        │Enter       send          ││  Waiting for server response │
        │Shift+Enter newline       ││                              │
        │PgUp/PgDn   scroll        ││                              │
        │Ctrl+N      new chat      │└──────────────────────────────┘
        │Ctrl+B      sidebar       │┌──────────────────────────────┐
        │Esc         quit          ││> █Send a message...          │
        └──────────────────────────┘└──────────────────────────────┘
        ");

        app.complete(
            &pending,
            Ok(ConversationResponse {
                message: "Hi there".into(),
                chat_id: "chat-42".into(),
            }),
        );
        let screen = render_app_to_string(&mut app, 60, 12);
        assert_snapshot!(screen, @r"
        ┌ promptly ────────────────┐┌ Chat ────────────────────────┐
        │Conversation              ││You                           │
        │chat-42                   ││  Hello                       │
        │                          ││                              │
        │Enter       send          ││AI                            │
        │Shift+Enter newline       ││  Hi there                    │
        │PgUp/PgDn   scroll        ││                              │
        │Ctrl+N      new chat      ││                              │
        │Ctrl+B      sidebar       │└──────────────────────────────┘
        │Esc         quit          │┌──────────────────────────────┐
        │                          ││> █Send a message...          │
        └──────────────────────────┘└──────────────────────────────┘
        ");
    }

    #[test]
    fn test_prompt_grows_on_screen() {
        let mut app = create_test_app();
        app.set_screen_width(24);
        type_text(&mut app, "\n\n\nx");
        let screen = render_app_to_string(&mut app, 24, 10);
        assert_snapshot!(screen, @r"
        ┌ Chat ────────────────┐
        │                      │
        │                      │
        └──────────────────────┘
        ┌──────────────────────┐
        │>                     │
        │                      │
        │                      │
        │  x█                  │
        └──────────────────────┘
        ");
    }

    #[test]
    fn test_full_width_line_stays_visible() {
        let mut app = create_test_app();
        app.set_screen_width(20);
        type_text(&mut app, "abcdefghijklmnop");
        let screen = render_app_to_string(&mut app, 20, 10);
        assert_snapshot!(screen, @r"
        ┌ Chat ────────────┐
        │                  │
        │                  │
        │                  │
        │                  │
        └──────────────────┘
        ┌──────────────────┐
        │> abcdefghijklmnop│
        │  █               │
        └──────────────────┘
        ");
    }

    #[test]
    fn test_sidebar_hidden() {
        let mut app = create_test_app();
        app.handle_action(Action::ToggleSidebar);
        let screen = render_app_to_string(&mut app, 80, 20);
        assert!(!screen.contains("(new)"));
    }
}
