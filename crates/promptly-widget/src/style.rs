//! Computed-style snapshots.
//!
//! A [`ComputedStyle`] holds property values the way a layout engine reports
//! them after the cascade: raw strings such as `"20px"`, `"normal"` or
//! `"none"`. Callers take a fresh snapshot for every measurement; nothing
//! here caches resolved values.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the font size when line-height is `normal`.
pub const NORMAL_LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Keyword a computed style reports for the default line height.
pub const LINE_HEIGHT_NORMAL: &str = "normal";

/// Keyword a computed style reports for an unbounded max-height.
pub const MAX_HEIGHT_NONE: &str = "none";

/// Snapshot of the computed style properties the auto-sizer reads.
///
/// Empty strings stand for properties the snapshot does not report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    pub line_height: String,
    pub border_top_width: String,
    pub border_bottom_width: String,
    pub padding_top: String,
    pub padding_bottom: String,
    pub font_size: String,
    pub max_height: String,
}

impl ComputedStyle {
    /// Create an empty snapshot (every property unreported).
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn line_height(mut self, value: impl Into<String>) -> Self {
        self.line_height = value.into();
        self
    }

    /// Set both border widths.
    #[must_use]
    pub fn border(mut self, top: impl Into<String>, bottom: impl Into<String>) -> Self {
        self.border_top_width = top.into();
        self.border_bottom_width = bottom.into();
        self
    }

    /// Set both vertical paddings.
    #[must_use]
    pub fn padding(mut self, top: impl Into<String>, bottom: impl Into<String>) -> Self {
        self.padding_top = top.into();
        self.padding_bottom = bottom.into();
        self
    }

    #[must_use]
    pub fn font_size(mut self, value: impl Into<String>) -> Self {
        self.font_size = value.into();
        self
    }

    #[must_use]
    pub fn max_height(mut self, value: impl Into<String>) -> Self {
        self.max_height = value.into();
        self
    }

    /// Resolve the snapshot into numeric metrics.
    pub fn metrics(&self) -> StyleMetrics {
        let font_size = px_or_zero(&self.font_size);
        let line_height = if self.line_height.trim() == LINE_HEIGHT_NORMAL {
            NORMAL_LINE_HEIGHT_FACTOR * font_size
        } else {
            px_or_zero(&self.line_height)
        };

        StyleMetrics {
            line_height,
            border_top: px_or_zero(&self.border_top_width),
            border_bottom: px_or_zero(&self.border_bottom_width),
            padding_top: px_or_zero(&self.padding_top),
            padding_bottom: px_or_zero(&self.padding_bottom),
            font_size,
            max_height: MaxHeight::parse(&self.max_height),
        }
    }
}

/// Numeric view of a [`ComputedStyle`]. Unparsable values resolve to `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleMetrics {
    pub line_height: f64,
    pub border_top: f64,
    pub border_bottom: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub font_size: f64,
    pub max_height: MaxHeight,
}

impl StyleMetrics {
    /// Sum of both borders.
    pub fn vertical_border(&self) -> f64 {
        self.border_top + self.border_bottom
    }

    /// Sum of both borders and both paddings.
    pub fn vertical_chrome(&self) -> f64 {
        self.vertical_border() + self.padding_top + self.padding_bottom
    }
}

/// Declared max-height of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxHeight {
    /// No limit: the `none` keyword, an unreported value, or garbage.
    None,
    /// A finite pixel limit.
    Px(f64),
}

impl MaxHeight {
    /// Parse a computed max-height value.
    pub fn parse(value: &str) -> Self {
        if value.trim() == MAX_HEIGHT_NONE {
            return Self::None;
        }
        parse_px(value).map_or(Self::None, Self::Px)
    }

    /// Whether content of `scroll_height` overflows this limit.
    pub fn is_exceeded_by(self, scroll_height: f64) -> bool {
        match self {
            Self::None => false,
            Self::Px(limit) => limit < scroll_height,
        }
    }
}

/// Parse a CSS pixel length the way `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix is taken, so
/// `"20px"`, `"20"` and `" 1.5e1px"` all parse. Returns `None` when there is
/// no numeric prefix or the result is not finite.
pub fn parse_px(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn px_or_zero(value: &str) -> f64 {
    parse_px(value).unwrap_or(0.0)
}
