//! Text input state for the prompt textarea.

use unicode_width::UnicodeWidthStr;

/// Cursor glyph. It takes a cell of its own, so it is measured with the text.
pub const CURSOR: char = '█';

/// Content, cursor and history of the prompt input.
///
/// The cursor is a character index, not a byte offset.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    cursor: usize,
    history: Vec<String>,
    /// Position while browsing history; `None` means the live input.
    history_index: Option<usize>,
    saved_input: String,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content with [`CURSOR`] inserted at the cursor position.
    pub fn display_text(&self) -> String {
        let mut text = self.content.clone();
        text.insert(self.byte_offset(self.cursor), CURSOR);
        text
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(offset, _)| offset)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert_str(offset, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Record a submitted message and clear the input.
    pub fn commit(&mut self, message: &str) {
        if !message.trim().is_empty() {
            self.history.push(message.to_string());
        }
        self.content.clear();
        self.cursor = 0;
        self.history_index = None;
        self.saved_input.clear();
    }

    /// Navigate to the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };

        self.history_index = Some(next);
        self.content = self.history[self.history.len() - 1 - next].clone();
        self.move_end();
    }

    /// Navigate to the next history entry, back towards the live input.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.content = std::mem::take(&mut self.saved_input);
                self.history_index = None;
                self.move_end();
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.content = self.history[self.history.len() - i].clone();
                self.move_end();
            }
        }
    }
}

/// Rows one logical line is drawn as at `width` columns.
///
/// Always at least one row. A width of zero disables wrapping.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.width() <= width {
        return vec![line.to_string()];
    }
    let rows: Vec<String> = textwrap::wrap(line, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect();
    if rows.is_empty() {
        vec![String::new()]
    } else {
        rows
    }
}

/// Visual rows `content` occupies when wrapped to `width` columns.
///
/// This is the terminal counterpart of a textarea's natural scroll height.
pub fn wrapped_rows(content: &str, width: usize) -> usize {
    content
        .split('\n')
        .map(|line| wrap_line(line, width).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        state.delete();
        assert_eq!(state.content(), "elXlo");

        state.move_end();
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert_str("héllo");
        state.move_home();
        state.move_right();
        state.move_right();
        state.backspace();
        assert_eq!(state.content(), "hllo");
        state.insert('é');
        assert_eq!(state.content(), "héllo");
    }

    #[test]
    fn test_history_navigation() {
        let mut state = TextInputState::new();
        state.commit("first");
        state.commit("second");

        state.insert_str("draft");
        state.history_prev();
        assert_eq!(state.content(), "second");
        state.history_prev();
        assert_eq!(state.content(), "first");
        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_next();
        assert_eq!(state.content(), "second");
        state.history_next();
        assert_eq!(state.content(), "draft");
    }

    #[test]
    fn test_display_text_places_cursor() {
        let mut state = TextInputState::new();
        assert_eq!(state.display_text(), "█");
        state.insert_str("héllo");
        state.move_left();
        assert_eq!(state.display_text(), "héll█o");
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("", 4), vec![""]);
        assert_eq!(wrap_line("  ", 4), vec!["  "]);
        assert_eq!(wrap_line("abcd", 4), vec!["abcd"]);
        assert_eq!(wrap_line("abcd█", 4), vec!["abcd", "█"]);
        assert_eq!(wrap_line("ab cd", 3), vec!["ab", "cd"]);
        assert_eq!(wrap_line("abcdef", 0), vec!["abcdef"]);
    }

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows("", 10), 1);
        assert_eq!(wrapped_rows("a\nb", 10), 2);
        assert_eq!(wrapped_rows("hello world again", 6), 3);
        assert_eq!(wrapped_rows("a\n", 0), 2);
    }
}
