//! Pluggable conversion of ADF-style rich documents
//!
//!     Documents are trees of typed nodes (optional children, text, attributes and inline marks),
//!     as produced by Atlassian-style editors. This crate walks such a tree once, depth first, and
//!     builds an arbitrary target value from it: a Markdown string, an HTML DOM, a tree
//!     visualization, or nothing at all when handlers only record side effects.
//!
//!     TLDR: For format authors:
//!         - A format is a table of handlers (a [`Formatter`]), never a traversal.
//!         - Node handlers receive the node, a [`Children`] capability, the conversion context and
//!           the sibling index. Children are only formatted when the handler asks for them.
//!         - Mark handlers receive the mark, a [`Next`] continuation for the inner layer, the text
//!           node and the context. The first mark in a node's list ends up outermost.
//!         - Unknown node types go to the default handler, unknown marks are skipped. Both are
//!           reported through a [`DiagnosticSink`], never printed.
//!
//! Architecture
//!
//!     .
//!     ├── adf                     # Node / Mark model and the conversion context
//!     ├── engine
//!     │   ├── mod.rs              # Traversal, Children, entry points
//!     │   ├── formatter.rs        # Handler tables
//!     │   ├── marks.rs            # Mark composition chain
//!     │   └── diagnostics.rs      # Diagnostic sinks
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats                 # Stock formatters (markdown, html, text, treeviz, trace)
//!
//!     This is a pure lib: it powers the adf cli but is shell agnostic, so nothing in here prints,
//!     reads env vars or touches the filesystem.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs                  # aggregates the per-area modules below
//!     ├── engine
//!     ├── markdown
//!     ├── html
//!     └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, hence the aggregator.

pub mod adf;
pub mod engine;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use adf::{ContextOverride, ConversionContext, ListKind, Mark, Node};
pub use engine::diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, NullSink, Severity, TracingSink,
};
pub use engine::formatter::{Formatter, MarkHandler, NodeHandler};
pub use engine::marks::Next;
pub use engine::{parse_document, run, run_json, run_json_with_sink, run_with_sink, Children};
pub use error::ConvertError;
pub use format::Format;
pub use registry::FormatRegistry;
