//! promptly-widget: Headless core of the promptly chat widget
//!
//! This crate provides the host-independent pieces of the chat view:
//! - Computed-style snapshots and textarea auto-sizing
//! - Chat row construction as detached element trees
//! - Cookie storage for the conversation identifier
//! - The conversation client and the session state tying it all together

pub mod autosize;
pub mod chat_row;
pub mod client;
pub mod config;
pub mod cookie;
pub mod element;
pub mod node;
pub mod session;
pub mod style;

// Re-export commonly used types
pub use autosize::{calculate_height, resize, MAX_VISIBLE_LINES};
pub use chat_row::{build_row, ChatEntry, Role, ROLE_ATTRIBUTE};
pub use client::{
    ClientError, ConversationClient, ConversationRequest, ConversationResponse, HttpTransport,
    Transport,
};
pub use config::{Config, ConfigError};
pub use cookie::{CookieError, CookieJar, CookieStore, FileCookieJar, CHAT_ID_COOKIE};
pub use element::{Element, InlineStyle, Tag};
pub use node::Node;
pub use session::{should_submit, ChatRow, ChatSession, KeyPress, PendingSubmission};
pub use style::{ComputedStyle, MaxHeight, StyleMetrics};

/// Returns the widget crate version.
pub fn widget_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_version() {
        let version = widget_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    #[test]
    fn test_end_to_end_sizing_scenario() {
        let mut textarea = Element::textarea()
            .with_value("Hello\nWorld")
            .with_scroll_height(42.0)
            .with_computed(
                ComputedStyle::new()
                    .line_height("20px")
                    .border("1px", "1px")
                    .padding("2px", "2px")
                    .font_size("14px")
                    .max_height("none"),
            );

        let height = calculate_height(textarea.line_count(), &textarea);
        assert!(height >= textarea.scroll_height);
        assert!(height >= 20.0 * 2.0 + 1.0 + 1.0 + 2.0 + 2.0);

        resize(&mut textarea);
        assert_eq!(textarea.height_px(), Some(height));
    }
}
