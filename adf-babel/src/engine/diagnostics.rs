//! Observational notices raised during a traversal.
//!
//! None of these are errors: each one describes a documented fallback the
//! engine took. They are routed through a [`DiagnosticSink`] handed to the
//! traversal, so the engine itself has no global output dependency.

use std::cell::RefCell;
use std::fmt;

/// How loud a diagnostic should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Expected in normal operation (unknown node or mark types).
    Notice,
    /// Signals an unusual caller.
    Warning,
}

/// A fallback taken by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No handler registered for the node type; the default handler ran.
    UnknownNodeType { node_type: String },
    /// No handler for this mark on this parent type; the mark was skipped.
    UnsupportedMark {
        node_type: String,
        mark_type: String,
    },
    /// The root was not a `doc` node and got wrapped in one.
    ImplicitDocumentRoot { root_type: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnknownNodeType { .. } | Diagnostic::UnsupportedMark { .. } => {
                Severity::Notice
            }
            Diagnostic::ImplicitDocumentRoot { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownNodeType { node_type } => {
                write!(f, "Unsupported node type \"{node_type}\", using default handler")
            }
            Diagnostic::UnsupportedMark {
                node_type,
                mark_type,
            } => write!(
                f,
                "Unsupported mark type \"{mark_type}\" on node type \"{node_type}\""
            ),
            Diagnostic::ImplicitDocumentRoot { root_type } => write!(
                f,
                "Root node is \"{root_type}\", not \"doc\"; wrapping it in a document"
            ),
        }
    }
}

/// Receiver for diagnostics raised during a traversal.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`: notices at debug level, warnings at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnknownNodeType { node_type } => {
                tracing::debug!(node_type = %node_type, "{diagnostic}");
            }
            Diagnostic::UnsupportedMark {
                node_type,
                mark_type,
            } => {
                tracing::debug!(node_type = %node_type, mark_type = %mark_type, "{diagnostic}");
            }
            Diagnostic::ImplicitDocumentRoot { root_type } => {
                tracing::warn!(root_type = %root_type, "{diagnostic}");
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory, in the order they were raised.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything collected so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Drain the collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
