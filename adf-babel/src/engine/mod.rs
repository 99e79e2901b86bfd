//! Depth-first traversal engine
//!
//! # The Algorithm
//!
//! For every node, [`Traversal::format_node`]:
//!
//! 1. Binds a [`Children`] capability to the node and the current context.
//!    Calling it formats each child (left to right, tagged with its sibling
//!    index) under the current context, optionally shallow-merged with a
//!    [`ContextOverride`]. It can be called any number of times; every call
//!    walks the subtree again.
//! 2. Picks the formatter's handler for the node type, falling back to the
//!    default handler (and reporting [`Diagnostic::UnknownNodeType`]).
//! 3. Runs the handler. Children are only visited if the handler asks for
//!    them, so a parent always runs before its descendants (pre-order).
//! 4. For `text` nodes carrying marks, folds the marks around the handler's
//!    result (see [`marks`]).
//!
//! Entry points ([`run`], [`run_json`] and their `_with_sink` variants)
//! validate the root, wrap non-`doc` roots in a synthetic document, and start
//! the walk with [`ConversionContext::root`] at sibling index 0.

pub mod diagnostics;
pub mod formatter;
pub mod marks;

use crate::adf::{ContextOverride, ConversionContext, Node};
use crate::error::ConvertError;
use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use formatter::Formatter;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;

/// One walk over a document with a fixed formatter and diagnostic sink.
pub struct Traversal<'a, T> {
    formatter: &'a Formatter<T>,
    sink: &'a dyn DiagnosticSink,
}

impl<'a, T> Traversal<'a, T> {
    pub fn new(formatter: &'a Formatter<T>, sink: &'a dyn DiagnosticSink) -> Self {
        Traversal { formatter, sink }
    }

    /// Format `node` and, through its handler, its subtree.
    pub fn format_node(
        &self,
        node: &Node,
        context: &ConversionContext,
        sibling_index: usize,
    ) -> T {
        let children = Children {
            node,
            traversal: self,
            context,
        };

        let handler = match self.formatter.node_handler(&node.node_type) {
            Some(handler) => handler,
            None => {
                self.sink.report(Diagnostic::UnknownNodeType {
                    node_type: node.node_type.clone(),
                });
                self.formatter.default_handler()
            }
        };

        let base = handler(node, &children, context, sibling_index);

        if node.is_text() && !node.marks.is_empty() {
            marks::apply_marks(self, node, context, base)
        } else {
            base
        }
    }
}

/// Capability handed to node handlers for formatting their children.
pub struct Children<'a, T> {
    node: &'a Node,
    traversal: &'a Traversal<'a, T>,
    context: &'a ConversionContext,
}

impl<'a, T> Children<'a, T> {
    /// Format every child under the parent's context.
    pub fn process(&self) -> Vec<T> {
        self.process_with(ContextOverride::inherit())
    }

    /// Format every child under the parent's context merged with `overrides`.
    ///
    /// Each call is an independent walk. Handlers that mutate external state
    /// will see those side effects repeated when a parent calls this more
    /// than once; keeping handlers pure is up to the formatter's author.
    pub fn process_with(&self, overrides: ContextOverride) -> Vec<T> {
        let context = self.context.merge(overrides);
        self.node
            .content
            .iter()
            .enumerate()
            .map(|(index, child)| self.traversal.format_node(child, &context, index))
            .collect()
    }

    /// Number of children the node has.
    pub fn len(&self) -> usize {
        self.node.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.content.is_empty()
    }
}

/// Format a document, reporting diagnostics through `tracing`.
pub fn run<T>(root: &Node, formatter: &Formatter<T>) -> Result<T, ConvertError> {
    run_with_sink(root, formatter, &TracingSink)
}

/// Format a document, reporting diagnostics to `sink`.
///
/// Fails with [`ConvertError::MalformedInput`] when the root has no type tag;
/// nothing is traversed in that case.
pub fn run_with_sink<T>(
    root: &Node,
    formatter: &Formatter<T>,
    sink: &dyn DiagnosticSink,
) -> Result<T, ConvertError> {
    if root.node_type.is_empty() {
        return Err(ConvertError::MalformedInput(
            "root node has an empty type tag".to_string(),
        ));
    }

    let root = normalize_root(root, sink);
    let traversal = Traversal::new(formatter, sink);
    Ok(traversal.format_node(&root, &ConversionContext::root(), 0))
}

/// Format a JSON value, reporting diagnostics through `tracing`.
pub fn run_json<T>(value: &Value, formatter: &Formatter<T>) -> Result<T, ConvertError> {
    run_json_with_sink(value, formatter, &TracingSink)
}

/// Validate and deserialize `value`, then format it.
pub fn run_json_with_sink<T>(
    value: &Value,
    formatter: &Formatter<T>,
    sink: &dyn DiagnosticSink,
) -> Result<T, ConvertError> {
    let root = node_from_value(value)?;
    run_with_sink(&root, formatter, sink)
}

/// Parse JSON text into a validated document node.
pub fn parse_document(source: &str) -> Result<Node, ConvertError> {
    let value: Value = serde_json::from_str(source)?;
    node_from_value(&value)
}

/// Check that `value` is node-shaped, then deserialize it.
pub fn node_from_value(value: &Value) -> Result<Node, ConvertError> {
    let object = value.as_object().ok_or_else(|| {
        ConvertError::MalformedInput(format!("expected a node object, found {}", kind_of(value)))
    })?;

    match object.get("type") {
        Some(Value::String(node_type)) if !node_type.is_empty() => {}
        Some(other) => {
            return Err(ConvertError::MalformedInput(format!(
                "node type tag must be a non-empty string, found {}",
                kind_of(other)
            )))
        }
        None => {
            return Err(ConvertError::MalformedInput(
                "root node has no type tag".to_string(),
            ))
        }
    }

    Ok(Node::deserialize(value)?)
}

/// Wrap a non-`doc` root into a synthetic document.
fn normalize_root<'n>(root: &'n Node, sink: &dyn DiagnosticSink) -> Cow<'n, Node> {
    if root.is_document() {
        Cow::Borrowed(root)
    } else {
        sink.report(Diagnostic::ImplicitDocumentRoot {
            root_type: root.node_type.clone(),
        });
        Cow::Owned(Node::document(vec![root.clone()]))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
