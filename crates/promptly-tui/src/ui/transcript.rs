//! Transcript widget: the scrolling list of chat rows.

use promptly_widget::{ChatRow, Role};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Styles;

/// Indentation of message bodies under their header.
const BODY_INDENT: &str = "  ";

/// Label shown above a row.
pub fn role_label(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::User) => "You",
        Some(Role::Assistant) => "AI",
        None => "?",
    }
}

/// Transcript pane, pinned to the bottom unless scrolled.
pub struct Transcript<'a> {
    rows: &'a [ChatRow],
    /// Lines scrolled up from the bottom.
    scroll: usize,
}

impl<'a> Transcript<'a> {
    pub fn new(rows: &'a [ChatRow]) -> Self {
        Self { rows, scroll: 0 }
    }

    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// All transcript lines for a body width of `width` columns.
    pub fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);
        let mut lines = Vec::new();

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }

            let role = row.role();
            let header_style = match role {
                Some(Role::User) => Styles::user(),
                _ => Styles::assistant(),
            };
            lines.push(Line::from(Span::styled(role_label(role), header_style)));

            let body_style = if row.is_pending() {
                Styles::pending()
            } else if row.is_error() {
                Styles::error()
            } else {
                Styles::default()
            };
            push_body(&mut lines, &row.text(), body_width, body_style);
        }

        lines
    }
}

fn push_body(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style) {
    for paragraph in text.split('\n') {
        let wrapped = textwrap::wrap(paragraph, width);
        if wrapped.is_empty() {
            lines.push(Line::from(BODY_INDENT));
            continue;
        }
        for piece in wrapped {
            lines.push(Line::from(vec![
                Span::raw(BODY_INDENT),
                Span::styled(piece.into_owned(), style),
            ]));
        }
    }
}

impl Widget for Transcript<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Chat ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines = self.build_lines(usize::from(inner.width));
        let height = usize::from(inner.height);
        let max_scroll = lines.len().saturating_sub(height);
        let top = max_scroll - self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .scroll((top as u16, 0))
            .render(inner, buf);
    }
}
