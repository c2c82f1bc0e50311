//! Textarea auto-sizing.
//!
//! Height is recomputed from scratch on every input event: edits can grow
//! or shrink the content (typing, paste, deletion) and the computed style
//! may change between calls, so nothing is carried over from the last run.

use tracing::debug;

use crate::element::Element;

/// Lines a textarea grows to before it starts scrolling.
pub const MAX_VISIBLE_LINES: usize = 8;

/// Overflow value when content exceeds the declared max-height.
pub const OVERFLOW_AUTO: &str = "auto";

/// Overflow value when all content fits.
pub const OVERFLOW_HIDDEN: &str = "hidden";

/// Resize a textarea to fit its content.
///
/// Anything other than a textarea is left untouched, so the handler can be
/// attached to a container and fed arbitrary descendants.
pub fn resize(element: &mut Element) {
    if !element.is_textarea() {
        return;
    }

    element.style.height = "0px".to_string();

    let line_count = element.line_count();
    let target = calculate_height(line_count, element);
    element.style.height = format_px(target);

    let max_height = element.computed.metrics().max_height;
    element.style.overflow_y = if max_height.is_exceeded_by(element.scroll_height) {
        OVERFLOW_AUTO
    } else {
        OVERFLOW_HIDDEN
    }
    .to_string();

    debug!(
        line_count,
        height = target,
        overflow = %element.style.overflow_y,
        "resized textarea"
    );
}

/// Height that shows `line_count` lines of `element` without clipping.
///
/// The style-based estimate covers the usual case; the scroll-based term is
/// a floor for soft-wrapped lines the line count does not see.
pub fn calculate_height(line_count: usize, element: &Element) -> f64 {
    let metrics = element.computed.metrics();

    #[allow(clippy::cast_precision_loss)]
    let style_based = metrics.line_height * line_count as f64 + metrics.vertical_chrome();
    let scroll_based = element.scroll_height + metrics.vertical_border();

    style_based.max(scroll_based)
}

/// Format a pixel length the way a style property is written.
fn format_px(value: f64) -> String {
    format!("{value}px")
}
