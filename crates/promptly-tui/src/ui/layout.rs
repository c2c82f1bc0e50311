//! Screen layout and terminal metrics for the prompt textarea.
//!
//! The terminal has no pixels, so one row stands in for one pixel: the
//! prompt's computed style reports a 1px line height and 1px borders, and
//! its max-height is the visible-line cap.

use promptly_widget::{ComputedStyle, Element};
use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the sidebar when visible.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Prompt prefix drawn before the first input line.
pub const PROMPT_PREFIX: &str = "> ";

/// Rows taken by the prompt's top and bottom borders.
const PROMPT_BORDER_ROWS: u16 = 2;

/// Computed style of the prompt textarea in terminal rows.
pub fn textarea_style(max_lines: usize) -> ComputedStyle {
    ComputedStyle::new()
        .line_height("1px")
        .border("1px", "1px")
        .padding("0px", "0px")
        .font_size("1px")
        .max_height(format!("{max_lines}px"))
}

/// Rows the prompt occupies, borders included.
///
/// The sized height is clamped to the visible-line cap the way a layout
/// engine applies max-height. A height that is not a pixel value (such as
/// `initial` right after a submit) falls back to a single line.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn prompt_rows(textarea: &Element, max_lines: usize) -> u16 {
    let min = 1 + PROMPT_BORDER_ROWS;
    let max = u16::try_from(max_lines).unwrap_or(u16::MAX).saturating_add(PROMPT_BORDER_ROWS);

    match textarea.height_px() {
        Some(height) if height > 0.0 => (height.ceil() as u16).clamp(min, max.max(min)),
        _ => min,
    }
}

/// Areas of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub sidebar: Option<Rect>,
    pub transcript: Rect,
    pub prompt: Rect,
}

/// Split the screen into sidebar, transcript and prompt.
pub fn screen_areas(area: Rect, sidebar_visible: bool, prompt_height: u16) -> ScreenAreas {
    let (sidebar, main) = if sidebar_visible && area.width > SIDEBAR_WIDTH * 2 {
        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)]).areas(area);
        (Some(sidebar), main)
    } else {
        (None, area)
    };

    let [transcript, prompt] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(prompt_height)]).areas(main);

    ScreenAreas {
        sidebar,
        transcript,
        prompt,
    }
}

/// Columns available for input text inside the prompt box.
pub fn prompt_text_width(screen_width: u16, sidebar_visible: bool) -> u16 {
    let main = if sidebar_visible && screen_width > SIDEBAR_WIDTH * 2 {
        screen_width - SIDEBAR_WIDTH
    } else {
        screen_width
    };
    #[allow(clippy::cast_possible_truncation)]
    let chrome = PROMPT_BORDER_ROWS + PROMPT_PREFIX.len() as u16;
    main.saturating_sub(chrome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptly_widget::resize;

    fn sized(value: &str, scroll_rows: f64) -> Element {
        let mut textarea = Element::textarea()
            .with_value(value)
            .with_scroll_height(scroll_rows)
            .with_computed(textarea_style(8));
        resize(&mut textarea);
        textarea
    }

    #[test]
    fn test_single_line_prompt() {
        assert_eq!(prompt_rows(&sized("hi", 1.0), 8), 3);
    }

    #[test]
    fn test_prompt_grows_with_lines() {
        assert_eq!(prompt_rows(&sized("a\nb\nc", 3.0), 8), 5);
    }

    #[test]
    fn test_prompt_grows_with_soft_wraps() {
        let textarea = sized("one long line", 4.0);
        assert_eq!(prompt_rows(&textarea, 8), 6);
        assert_eq!(textarea.style.overflow_y, "hidden");
    }

    #[test]
    fn test_prompt_caps_at_max_lines() {
        let value = "x\n".repeat(11);
        let textarea = sized(&value, 12.0);
        assert_eq!(prompt_rows(&textarea, 8), 10);
        assert_eq!(textarea.style.overflow_y, "auto");
    }

    #[test]
    fn test_prompt_initial_height() {
        let mut textarea = Element::textarea();
        textarea.style.height = "initial".into();
        assert_eq!(prompt_rows(&textarea, 8), 3);
    }

    #[test]
    fn test_screen_areas_with_sidebar() {
        let areas = screen_areas(Rect::new(0, 0, 100, 30), true, 3);
        assert_eq!(areas.sidebar.map(|r| r.width), Some(SIDEBAR_WIDTH));
        assert_eq!(areas.prompt.height, 3);
        assert_eq!(areas.transcript.height, 27);
        assert_eq!(areas.prompt.width, 100 - SIDEBAR_WIDTH);
    }

    #[test]
    fn test_screen_areas_hides_sidebar_when_narrow() {
        let areas = screen_areas(Rect::new(0, 0, 40, 10), true, 3);
        assert!(areas.sidebar.is_none());
    }

    #[test]
    fn test_prompt_text_width() {
        assert_eq!(prompt_text_width(100, false), 96);
        assert_eq!(prompt_text_width(100, true), 96 - SIDEBAR_WIDTH);
        assert_eq!(prompt_text_width(2, false), 0);
    }
}
