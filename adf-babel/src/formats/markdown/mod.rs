//! Markdown format implementation
//!
//! Export only: ADF → CommonMark-flavoured Markdown, built as a handler table over the engine.
//!
//! # Element Mapping Table
//!
//! | ADF Node        | Markdown                                 | Notes                                      |
//! |-----------------|------------------------------------------|--------------------------------------------|
//! | doc             | children joined                          |                                            |
//! | paragraph       | text + blank line                        |                                            |
//! | heading         | `#`×level + space + text                 | missing or zero level → 1, never clamped   |
//! | bulletList      | items                                    | blank line after the outermost list only   |
//! | orderedList     | items                                    | numbering from `order` attr or position    |
//! | listItem        | indent + marker + content                | nested list kept tight                     |
//! | blockquote      | every line prefixed `> `                 |                                            |
//! | codeBlock       | fenced block with language               | raw text, never escaped                    |
//! | rule            | `---`                                    |                                            |
//! | hardBreak       | two spaces + newline                     |                                            |
//! | mention         | `@name`                                  | text, then id, then "mention"              |
//! | emoji           | short name                               |                                            |
//! | inlineCard      | `[url](url)`                             |                                            |
//! | panel           | blockquote with a bold `Panel` title     |                                            |
//! | status          | `[TEXT]`                                 | upper-cased, `[STATUS]` when empty         |
//! | (anything else) | children joined                          |                                            |
//!
//! | Mark            | Markdown                                 |
//! |-----------------|------------------------------------------|
//! | strong          | `**x**`                                  |
//! | em              | `*x*`                                    |
//! | strike          | `~~x~~`                                  |
//! | code            | `` `x` ``                                |
//! | link            | `[x](href)`                              |
//! | underline, textColor, subsup | `x` (no Markdown equivalent) |
//!
//! # Lossy Conversions
//!
//! - Underline, colour and sub/superscript are dropped.
//! - Panels flatten into quotes; their type survives only in the title.
//! - Text inside marks is escaped, but the delimiters are not balanced against neighbours, so
//!   adjacent marked runs can merge (`**a****b**`).

mod escape;
mod serializer;

pub use escape::escape_markdown;
pub use serializer::markdown_formatter;

use crate::adf::Node;
use crate::engine::formatter::Formatter;
use crate::error::ConvertError;
use crate::format::{parse_bool_option, parse_usize_option, unknown_option, Format};
use std::collections::HashMap;

/// Knobs for the Markdown formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Marker for bullet list items.
    pub bullet_marker: char,
    /// Spaces per list nesting level.
    pub indent_width: usize,
    /// Backslash-escape Markdown syntax in text leaves.
    pub escape_text: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        MarkdownOptions {
            bullet_marker: '*',
            indent_width: 2,
            escape_text: true,
        }
    }
}

/// Widest list indent accepted per nesting level.
pub const MAX_INDENT_WIDTH: usize = 16;

impl MarkdownOptions {
    pub(crate) fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width.min(MAX_INDENT_WIDTH).saturating_mul(depth))
    }

    /// Apply `--extra-*` style string options on top of `self`.
    pub fn with_overrides(mut self, options: &HashMap<String, String>) -> Result<Self, ConvertError> {
        for (key, value) in options {
            match key.as_str() {
                "bullet-marker" => self.bullet_marker = parse_bullet_marker(value)?,
                "indent-width" => {
                    self.indent_width = check_indent_width(parse_usize_option(key, value)?)?
                }
                "escape-text" => self.escape_text = parse_bool_option(key, value)?,
                _ => return Err(unknown_option("markdown", key)),
            }
        }
        Ok(self)
    }
}

/// Reject indent widths above [`MAX_INDENT_WIDTH`].
pub fn check_indent_width(width: usize) -> Result<usize, ConvertError> {
    if width > MAX_INDENT_WIDTH {
        return Err(ConvertError::NotSupported(format!(
            "Indent width {width} is too large, expected at most {MAX_INDENT_WIDTH}"
        )));
    }
    Ok(width)
}

/// Accept one of the three CommonMark bullet characters.
pub fn parse_bullet_marker(raw: &str) -> Result<char, ConvertError> {
    match raw.trim() {
        "*" => Ok('*'),
        "-" => Ok('-'),
        "+" => Ok('+'),
        other => Err(ConvertError::NotSupported(format!(
            "Invalid bullet marker '{other}', expected one of '*', '-', '+'"
        ))),
    }
}

/// Format implementation for Markdown
pub struct MarkdownFormat {
    options: MarkdownOptions,
    formatter: Formatter<String>,
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownFormat {
            options,
            formatter: markdown_formatter(options),
        }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        crate::engine::run(doc, &self.formatter)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        if options.is_empty() {
            return self.serialize(doc);
        }
        let options = self.options.with_overrides(options)?;
        crate::engine::run(doc, &markdown_formatter(options))
    }
}
