//! Prompt textarea widget.
//!
//! Draws the input box at the height the auto-sizer picked. When the
//! textarea reports `auto` overflow the content scrolls to keep the cursor
//! in view; otherwise everything fits and no scrolling happens.

use promptly_widget::autosize::OVERFLOW_AUTO;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::input::{wrap_line, TextInputState, CURSOR};
use crate::ui::layout::PROMPT_PREFIX;
use crate::ui::theme::Styles;

const PLACEHOLDER: &str = "Send a message...";

/// Prompt input box.
pub struct PromptInput<'a> {
    input: &'a TextInputState,
    overflow_y: &'a str,
}

impl<'a> PromptInput<'a> {
    pub fn new(input: &'a TextInputState, overflow_y: &'a str) -> Self {
        Self { input, overflow_y }
    }

    /// One display line per wrapped row, and the row holding the cursor.
    ///
    /// Rows come from [`wrap_line`] at the same width the textarea is
    /// measured with, cursor included, so the box shows exactly the rows
    /// the auto-sizer counted.
    fn build_lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        if self.input.is_empty() {
            let line = Line::from(vec![
                Span::styled(PROMPT_PREFIX, Styles::user()),
                Span::styled(CURSOR.to_string(), Styles::default()),
                Span::styled(PLACEHOLDER, Styles::dim()),
            ]);
            return (vec![line], 0);
        }

        let (cursor_line, cursor_nth) = self.cursor_glyph();
        let continuation = " ".repeat(PROMPT_PREFIX.len());
        let mut lines = Vec::new();
        let mut cursor_row = 0;

        for (idx, text) in self.input.display_text().split('\n').enumerate() {
            let mut glyphs_seen = 0;
            for row in wrap_line(text, width) {
                if idx == cursor_line {
                    let glyphs = row.matches(CURSOR).count();
                    if glyphs_seen <= cursor_nth && cursor_nth < glyphs_seen + glyphs {
                        cursor_row = lines.len();
                    }
                    glyphs_seen += glyphs;
                }

                let prefix = if lines.is_empty() {
                    Span::styled(PROMPT_PREFIX, Styles::user())
                } else {
                    Span::raw(continuation.clone())
                };
                lines.push(Line::from(vec![prefix, Span::styled(row, Styles::default())]));
            }
        }

        (lines, cursor_row)
    }

    /// Logical line of the cursor, and how many cursor glyphs the user
    /// typed before it on that line.
    fn cursor_glyph(&self) -> (usize, usize) {
        let before: String = self
            .input
            .content()
            .chars()
            .take(self.input.cursor())
            .collect();
        let line = before.matches('\n').count();
        let nth = before
            .rsplit('\n')
            .next()
            .map_or(0, |text| text.matches(CURSOR).count());
        (line, nth)
    }
}

impl Widget for PromptInput<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::default());

        let inner_height = usize::from(area.height.saturating_sub(2));
        let text_width =
            usize::from(area.width.saturating_sub(2)).saturating_sub(PROMPT_PREFIX.len());
        let (lines, cursor_row) = self.build_lines(text_width);

        let scroll = if self.overflow_y == OVERFLOW_AUTO {
            cursor_row.saturating_sub(inner_height.saturating_sub(1))
        } else {
            0
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use insta::assert_snapshot;

    fn input_with(text: &str) -> TextInputState {
        let mut input = TextInputState::new();
        input.insert_str(text);
        input
    }

    fn render(input: &TextInputState, overflow: &str, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PromptInput::new(input, overflow).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_prompt_shows_placeholder() {
        let screen = render(&TextInputState::new(), "hidden", 30, 3);
        assert_snapshot!(screen, @r"
        ┌────────────────────────────┐
        │> █Send a message...        │
        └────────────────────────────┘
        ");
    }

    #[test]
    fn test_blank_middle_line() {
        let screen = render(&input_with("a\n\nx"), "hidden", 20, 5);
        assert_snapshot!(screen, @r"
        ┌──────────────────┐
        │> a               │
        │                  │
        │  x█              │
        └──────────────────┘
        ");
    }

    #[test]
    fn test_line_at_text_width_wraps_cursor() {
        let screen = render(&input_with("abcdefghijklmnop"), "hidden", 20, 4);
        assert_snapshot!(screen, @r"
        ┌──────────────────┐
        │> abcdefghijklmnop│
        │  █               │
        └──────────────────┘
        ");
    }

    #[test]
    fn test_cursor_inside_line() {
        let mut input = input_with("Hello\nWorld");
        input.move_left();
        let screen = render(&input, "hidden", 20, 4);
        assert_snapshot!(screen, @r"
        ┌──────────────────┐
        │> Hello           │
        │  Worl█d          │
        └──────────────────┘
        ");
    }

    #[test]
    fn test_auto_overflow_scrolls_to_cursor() {
        let screen = render(&input_with("l1\nl2\nl3\nlast"), OVERFLOW_AUTO, 20, 4);
        assert_snapshot!(screen, @r"
        ┌──────────────────┐
        │  l3              │
        │  last█           │
        └──────────────────┘
        ");
    }

    #[test]
    fn test_auto_overflow_follows_wrapped_cursor() {
        let mut input = input_with("abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGH");
        let screen = render(&input, OVERFLOW_AUTO, 20, 3);
        assert_snapshot!(screen, @r"
        ┌──────────────────┐
        │  6789ABCDEFGH█   │
        └──────────────────┘
        ");

        input.move_home();
        let screen = render(&input, OVERFLOW_AUTO, 20, 3);
        assert_snapshot!(screen, @r"
        ┌──────────────────┐
        │> █abcdefghijklmno│
        └──────────────────┘
        ");
    }

    #[test]
    fn test_rows_match_measured_height() {
        for text in ["a\n\nx", "abcdefghijklmnop", "one two three four five six", "\n\n\nx"] {
            let input = input_with(text);
            let (lines, _) = PromptInput::new(&input, "hidden").build_lines(16);
            assert_eq!(lines.len(), crate::input::wrapped_rows(&input.display_text(), 16));
        }
    }
}
