//! Core data structures for ADF-style documents.
//!
//! Node and mark types are open strings rather than a closed enum: documents
//! produced by newer editors routinely carry types this crate has never seen,
//! and those must still flow through a formatter's default handler.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type tag of the document root.
pub const DOC_TYPE: &str = "doc";

/// Type tag of text leaves, the only nodes that get marks applied.
pub const TEXT_TYPE: &str = "text";

/// Open-ended attribute mapping shared by nodes and marks.
pub type Attrs = Map<String, Value>;

/// Represents one element of the document tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Represents an inline decoration attached to a text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl Node {
    /// Create a node of the given type with no children, text or attributes.
    pub fn new(node_type: impl Into<String>) -> Self {
        Node {
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    /// Create a `doc` root holding `content`.
    pub fn document(content: Vec<Node>) -> Self {
        Node::new(DOC_TYPE).with_content(content)
    }

    /// Create a `text` leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Node {
            node_type: TEXT_TYPE.to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    /// Set a single attribute, creating the mapping if needed.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_document(&self) -> bool {
        self.node_type == DOC_TYPE
    }

    pub fn is_text(&self) -> bool {
        self.node_type == TEXT_TYPE
    }

    /// Literal text, or the empty string for nodes without one.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }

    /// String attribute, treating empty strings as absent.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        non_empty_str(self.attr(key))
    }

    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        self.attr(key).and_then(Value::as_u64)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.content.iter().map(Node::subtree_len).sum::<usize>()
    }
}

impl Mark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Mark {
            mark_type: mark_type.into(),
            attrs: None,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }

    /// String attribute, treating empty strings as absent.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        non_empty_str(self.attr(key))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
