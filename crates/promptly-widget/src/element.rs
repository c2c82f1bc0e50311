//! Input elements the auto-sizer operates on.

use crate::style::ComputedStyle;

/// Element kind, mirroring the tag name a host UI would report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Textarea,
    Input,
    Div,
    Other(String),
}

impl Tag {
    /// Parse a tag name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "textarea" => Self::Textarea,
            "input" => Self::Input,
            "div" => Self::Div,
            other => Self::Other(other.to_string()),
        }
    }

    /// Lowercase tag name.
    pub fn name(&self) -> &str {
        match self {
            Self::Textarea => "textarea",
            Self::Input => "input",
            Self::Div => "div",
            Self::Other(name) => name,
        }
    }
}

/// Inline style the sizer writes. Both properties start out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub height: String,
    pub overflow_y: String,
}

/// A text-input-capable element as seen by the auto-sizer.
///
/// `scroll_height` is the natural height of the content as measured by the
/// host layout, and `computed` is the host's current computed style. Hosts
/// refresh both before every resize.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub value: String,
    pub scroll_height: f64,
    pub computed: ComputedStyle,
    pub style: InlineStyle,
}

impl Element {
    /// Create an empty element of the given kind.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            value: String::new(),
            scroll_height: 0.0,
            computed: ComputedStyle::default(),
            style: InlineStyle::default(),
        }
    }

    /// Create an empty textarea.
    pub fn textarea() -> Self {
        Self::new(Tag::Textarea)
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_scroll_height(mut self, scroll_height: f64) -> Self {
        self.scroll_height = scroll_height;
        self
    }

    #[must_use]
    pub fn with_computed(mut self, computed: ComputedStyle) -> Self {
        self.computed = computed;
        self
    }

    /// Whether this element is a multi-line text input.
    pub fn is_textarea(&self) -> bool {
        self.tag == Tag::Textarea
    }

    /// Number of lines in the current value (`1 + newlines`).
    pub fn line_count(&self) -> usize {
        1 + self.value.matches('\n').count()
    }

    /// The inline height in pixels, if one is set.
    pub fn height_px(&self) -> Option<f64> {
        crate::style::parse_px(&self.style.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_from_name() {
        assert_eq!(Tag::from_name("TEXTAREA"), Tag::Textarea);
        assert_eq!(Tag::from_name("div"), Tag::Div);
        assert_eq!(Tag::from_name("span"), Tag::Other("span".into()));
        assert_eq!(Tag::from_name("Span").name(), "span");
    }

    #[test]
    fn test_line_count() {
        assert_eq!(Element::textarea().line_count(), 1);
        assert_eq!(Element::textarea().with_value("Hello\nWorld").line_count(), 2);
        assert_eq!(Element::textarea().with_value("\n\n").line_count(), 3);
    }

    #[test]
    fn test_new_element_has_empty_inline_style() {
        let element = Element::new(Tag::Div);
        assert_eq!(element.style.height, "");
        assert_eq!(element.style.overflow_y, "");
        assert_eq!(element.height_px(), None);
    }
}
