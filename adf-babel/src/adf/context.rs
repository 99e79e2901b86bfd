//! Traversal state threaded down the tree.
//!
//! A [`ConversionContext`] is never mutated. Handlers that need to change it
//! for their subtree pass a [`ContextOverride`] to
//! [`Children::process_with`](crate::engine::Children::process_with); the
//! override is shallow-merged onto the parent's context, so fields it leaves
//! unset pass through unchanged.

use std::fmt;

/// Kind of the innermost enclosing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bullet,
    Ordered,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Bullet => write!(f, "bullet"),
            ListKind::Ordered => write!(f, "ordered"),
        }
    }
}

/// State carried through a traversal that does not belong to any one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionContext {
    /// Nesting depth of the innermost enclosing list; `None` outside any list,
    /// `Some(0)` inside a top-level list.
    pub list_depth: Option<usize>,
    /// Kind of the innermost enclosing list.
    pub list_kind: Option<ListKind>,
}

/// Per-field overrides applied on descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextOverride {
    pub list_depth: Option<Option<usize>>,
    pub list_kind: Option<Option<ListKind>>,
}

impl ConversionContext {
    /// Context for the document root: outside any list.
    pub fn root() -> Self {
        ConversionContext::default()
    }

    /// Depth a list entered from this context gets.
    pub fn nested_list_depth(&self) -> usize {
        self.list_depth.map_or(0, |depth| depth + 1)
    }

    pub fn is_inside_list(&self) -> bool {
        self.list_depth.is_some()
    }

    /// Shallow merge: fields set in `overrides` replace ours, the rest are kept.
    pub fn merge(&self, overrides: ContextOverride) -> Self {
        ConversionContext {
            list_depth: overrides.list_depth.unwrap_or(self.list_depth),
            list_kind: overrides.list_kind.unwrap_or(self.list_kind),
        }
    }
}

impl ContextOverride {
    /// An override that changes nothing.
    pub fn inherit() -> Self {
        ContextOverride::default()
    }

    /// Override the list depth.
    pub fn list_depth(mut self, depth: usize) -> Self {
        self.list_depth = Some(Some(depth));
        self
    }

    /// Override the list kind.
    pub fn list_kind(mut self, kind: ListKind) -> Self {
        self.list_kind = Some(Some(kind));
        self
    }

    /// Reset both fields to the "outside any list" state.
    pub fn outside_list(mut self) -> Self {
        self.list_depth = Some(None);
        self.list_kind = Some(None);
        self
    }

    /// Whether applying this override is a no-op.
    pub fn is_empty(&self) -> bool {
        self.list_depth.is_none() && self.list_kind.is_none()
    }
}
