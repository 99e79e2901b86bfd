//! Document model walked by the engine.
//!
//! Nodes are produced outside this crate (usually deserialized from JSON) and
//! are only ever borrowed during a traversal.

pub mod context;
pub mod nodes;

pub use context::{ContextOverride, ConversionContext, ListKind};
pub use nodes::{Attrs, Mark, Node, DOC_TYPE, TEXT_TYPE};
