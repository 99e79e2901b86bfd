//! Mark composition for text nodes.
//!
//! Marks are folded right to left into a chain of [`Next`] continuations whose
//! innermost link yields the text node's base result. Resolving the outermost
//! link therefore runs the first mark's handler first, and each handler
//! decides if and when to resolve the layer inside it, so `[A, B]` on `x`
//! produces `A(B(x))`.

use super::diagnostics::Diagnostic;
use super::Traversal;
use crate::adf::{ConversionContext, Mark, Node};

/// Deferred inner layer of a mark chain.
///
/// Resolving consumes it: a handler can resolve it once, or drop it to
/// suppress everything inside.
pub struct Next<'a, T> {
    inner: Box<dyn FnOnce() -> T + 'a>,
}

impl<'a, T> Next<'a, T> {
    pub fn new<F>(produce: F) -> Self
    where
        F: FnOnce() -> T + 'a,
    {
        Next {
            inner: Box::new(produce),
        }
    }

    /// Produce the inner value (inner marks already applied).
    pub fn resolve(self) -> T {
        (self.inner)()
    }
}

/// Fold `node.marks` around `base`, first mark outermost.
pub(crate) fn apply_marks<'a, T>(
    traversal: &'a Traversal<'a, T>,
    node: &'a Node,
    context: &'a ConversionContext,
    base: T,
) -> T
where
    T: 'a,
{
    let mut next = Next::new(move || base);
    for mark in node.marks.iter().rev() {
        let inner = next;
        next = Next::new(move || apply_mark(traversal, mark, inner, node, context));
    }
    next.resolve()
}

fn apply_mark<'a, T>(
    traversal: &Traversal<'a, T>,
    mark: &Mark,
    next: Next<'_, T>,
    node: &Node,
    context: &ConversionContext,
) -> T {
    match traversal
        .formatter
        .mark_handler(&node.node_type, &mark.mark_type)
    {
        Some(handler) => handler(mark, next, node, context),
        None => {
            traversal.sink.report(Diagnostic::UnsupportedMark {
                node_type: node.node_type.clone(),
                mark_type: mark.mark_type.clone(),
            });
            next.resolve()
        }
    }
}
