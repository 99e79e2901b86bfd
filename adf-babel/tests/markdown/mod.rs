//! Markdown format tests
//!
//! Element-level expectations for ADF → Markdown, plus a kitchensink document checked both as
//! text and through comrak's AST.

mod kitchensink;
mod marks;

use adf_babel::format::Format;
use adf_babel::formats::markdown::{MarkdownFormat, MarkdownOptions};
use adf_babel::Node;

/// Convert with default options.
pub fn to_markdown(doc: &Node) -> String {
    MarkdownFormat::default().serialize(doc).unwrap()
}

pub fn to_markdown_with(doc: &Node, options: MarkdownOptions) -> String {
    MarkdownFormat::new(options).serialize(doc).unwrap()
}
