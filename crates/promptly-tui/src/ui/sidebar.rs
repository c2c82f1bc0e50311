//! Sidebar with the conversation identifier and key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Styles;

const KEY_HINTS: [(&str, &str); 6] = [
    ("Enter", "send"),
    ("Shift+Enter", "newline"),
    ("PgUp/PgDn", "scroll"),
    ("Ctrl+N", "new chat"),
    ("Ctrl+B", "sidebar"),
    ("Esc", "quit"),
];

pub struct Sidebar<'a> {
    chat_id: Option<&'a str>,
    pending: usize,
}

impl<'a> Sidebar<'a> {
    pub fn new(chat_id: Option<&'a str>, pending: usize) -> Self {
        Self { chat_id, pending }
    }

    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled("Conversation", Styles::title())),
            Line::from(Span::styled(
                truncate(self.chat_id.unwrap_or("(new)"), width),
                Styles::default(),
            )),
        ];

        if self.pending > 0 {
            lines.push(Line::from(Span::styled(
                format!("{} awaiting reply", self.pending),
                Styles::pending(),
            )));
        }

        lines.push(Line::default());
        for (key, label) in KEY_HINTS {
            lines.push(Line::from(vec![
                Span::styled(format!("{key:<12}"), Styles::user()),
                Span::styled(label, Styles::dim()),
            ]));
        }
        lines
    }
}

/// Cut `text` to `width` columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" promptly ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.build_lines(usize::from(inner.width))).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn test_new_conversation_label() {
        let lines = Sidebar::new(None, 0).build_lines(20);
        assert_eq!(lines[1].to_string(), "(new)");
    }

    #[test]
    fn test_pending_count_shown() {
        let lines = Sidebar::new(Some("chat-1"), 2).build_lines(20);
        assert_eq!(lines[1].to_string(), "chat-1");
        assert_eq!(lines[2].to_string(), "2 awaiting reply");
    }
}
