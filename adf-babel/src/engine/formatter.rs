//! Handler tables supplied by callers
//!
//! A [`Formatter`] maps node types to node handlers and
//! (parent node type, mark type) pairs to mark handlers, with a mandatory
//! default node handler for everything else. The engine only reads it, so one
//! formatter can serve any number of traversals, on any thread.

use super::marks::Next;
use super::Children;
use crate::adf::{ConversionContext, Mark, Node};
use std::collections::HashMap;

/// Handler invoked for a node: `(node, children, context, sibling_index)`.
pub type NodeHandler<T> =
    Box<dyn Fn(&Node, &Children<'_, T>, &ConversionContext, usize) -> T + Send + Sync>;

/// Handler invoked for a mark: `(mark, next, parent_node, context)`.
pub type MarkHandler<T> =
    Box<dyn Fn(&Mark, Next<'_, T>, &Node, &ConversionContext) -> T + Send + Sync>;

/// Table of node and mark handlers producing values of type `T`.
///
/// # Examples
///
/// ```ignore
/// let formatter = Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
///     .with_node("text", |node, _children, _ctx, _idx| node.text_or_empty().to_string())
///     .with_mark("text", "strong", |_mark, next, _node, _ctx| format!("**{}**", next.resolve()));
///
/// let markdown = adf_babel::run(&doc, &formatter)?;
/// ```
pub struct Formatter<T> {
    default_node: NodeHandler<T>,
    nodes: HashMap<String, NodeHandler<T>>,
    marks: HashMap<String, HashMap<String, MarkHandler<T>>>,
}

impl<T> Formatter<T> {
    /// Create a formatter with only a default node handler.
    pub fn new<F>(default_node: F) -> Self
    where
        F: Fn(&Node, &Children<'_, T>, &ConversionContext, usize) -> T + Send + Sync + 'static,
    {
        Formatter {
            default_node: Box::new(default_node),
            nodes: HashMap::new(),
            marks: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for a node type.
    pub fn with_node<F>(mut self, node_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Node, &Children<'_, T>, &ConversionContext, usize) -> T + Send + Sync + 'static,
    {
        self.nodes.insert(node_type.into(), Box::new(handler));
        self
    }

    /// Register (or replace) the handler for a mark on a given parent node type.
    pub fn with_mark<F>(
        mut self,
        parent_type: impl Into<String>,
        mark_type: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(&Mark, Next<'_, T>, &Node, &ConversionContext) -> T + Send + Sync + 'static,
    {
        self.marks
            .entry(parent_type.into())
            .or_default()
            .insert(mark_type.into(), Box::new(handler));
        self
    }

    /// Replace the default node handler.
    pub fn with_default<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Node, &Children<'_, T>, &ConversionContext, usize) -> T + Send + Sync + 'static,
    {
        self.default_node = Box::new(handler);
        self
    }

    pub fn node_handler(&self, node_type: &str) -> Option<&NodeHandler<T>> {
        self.nodes.get(node_type)
    }

    pub fn default_handler(&self) -> &NodeHandler<T> {
        &self.default_node
    }

    pub fn mark_handler(&self, parent_type: &str, mark_type: &str) -> Option<&MarkHandler<T>> {
        self.marks
            .get(parent_type)
            .and_then(|marks| marks.get(mark_type))
    }

    pub fn has_node(&self, node_type: &str) -> bool {
        self.nodes.contains_key(node_type)
    }

    pub fn has_mark(&self, parent_type: &str, mark_type: &str) -> bool {
        self.mark_handler(parent_type, mark_type).is_some()
    }

    /// Registered node types (sorted)
    pub fn node_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl<T> std::fmt::Debug for Formatter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut marks: Vec<(&str, Vec<&str>)> = self
            .marks
            .iter()
            .map(|(parent, table)| {
                let mut types: Vec<&str> = table.keys().map(String::as_str).collect();
                types.sort_unstable();
                (parent.as_str(), types)
            })
            .collect();
        marks.sort_unstable();
        f.debug_struct("Formatter")
            .field("nodes", &self.node_types())
            .field("marks", &marks)
            .finish_non_exhaustive()
    }
}
