//! Chat row construction.

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Attribute carrying the role on the outer row node.
pub const ROLE_ATTRIBUTE: &str = "data-entry-role";

/// Role of the author of one chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message.
    User,
    /// Server (model) response.
    Assistant,
}

impl Role {
    /// Lowercase label stored in [`ROLE_ATTRIBUTE`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse a role label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chat turn before it is projected into a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: Role,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    /// Build the row for this entry, consuming it.
    pub fn into_row(self) -> Node {
        build_row(&self.text, self.role)
    }
}

/// Build a detached row for one chat turn.
///
/// ```text
/// div.row.chat-message[data-entry-role]
///   div.col-12
///     div.card.bg-light.py-2.py-md-3.border
///       div.card-body   <- text, verbatim
/// ```
pub fn build_row(text: &str, role: Role) -> Node {
    let body = Node::new("div").class_name("card-body").text(text);
    let card = Node::new("div")
        .class_name("card bg-light py-2 py-md-3 border")
        .child(body);
    let container = Node::new("div").class_name("col-12").child(card);

    Node::new("div")
        .class_name("row chat-message")
        .attr(ROLE_ATTRIBUTE, role.as_str())
        .child(container)
}

/// Role recorded on a row built by [`build_row`].
pub fn row_role(row: &Node) -> Option<Role> {
    row.attribute(ROLE_ATTRIBUTE).and_then(Role::from_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_row_role_and_text() {
        let row = build_row("Hello", Role::User);
        assert_eq!(row.attribute(ROLE_ATTRIBUTE), Some("user"));
        assert_eq!(row.text_content(), "Hello");
        assert_eq!(row_role(&row), Some(Role::User));
    }

    #[test]
    fn test_build_row_shape() {
        let row = build_row("Hi", Role::Assistant);
        assert!(row.has_class("row") && row.has_class("chat-message"));

        let container = &row.children[0];
        assert!(container.has_class("col-12"));

        let card = &container.children[0];
        assert_eq!(card.class_list(), "card bg-light py-2 py-md-3 border");

        let body = &card.children[0];
        assert!(body.has_class("card-body"));
        assert_eq!(body.text.as_deref(), Some("Hi"));
        assert!(body.children.is_empty());
    }

    #[test]
    fn test_build_row_keeps_markup_as_text() {
        let text = "<img src=x onerror=alert(1)>";
        let row = build_row(text, Role::User);
        assert_eq!(row.text_content(), text);
        assert!(row.find_by_class("card-body").unwrap().children.is_empty());
        assert!(row.to_html().contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!row.to_html().contains("<img"));
    }

    #[test]
    fn test_build_row_empty_text() {
        let row = build_row("", Role::Assistant);
        assert_eq!(row.text_content(), "");
        assert_eq!(row_role(&row), Some(Role::Assistant));
    }

    #[test]
    fn test_entry_into_row() {
        let row = ChatEntry::user("Hi").into_row();
        assert_eq!(row, build_row("Hi", Role::User));

        let row = ChatEntry::assistant("Hello").into_row();
        assert_eq!(row_role(&row), Some(Role::Assistant));
        assert_eq!(row.text_content(), "Hello");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
