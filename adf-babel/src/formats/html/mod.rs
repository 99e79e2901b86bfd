//! HTML format implementation
//!
//! Export only: ADF → HTML5 fragment (or a minimal standalone page).
//!
//! # Library Choice
//!
//! Handlers build a `markup5ever_rcdom` tree and `html5ever` serializes it, so escaping of text
//! and attribute values is never done by hand.
//!
//! # Element Mapping Table
//!
//! | ADF Node      | HTML                                                   |
//! |---------------|--------------------------------------------------------|
//! | doc           | `<div class="adf-document">`                           |
//! | paragraph     | `<p>`                                                  |
//! | heading       | `<h1>`..`<h6>` (deeper levels clamped to 6)            |
//! | bulletList    | `<ul>`                                                 |
//! | orderedList   | `<ol>`, with `start` when `order` is not 1             |
//! | listItem      | `<li>`                                                 |
//! | blockquote    | `<blockquote>`                                         |
//! | codeBlock     | `<pre class="adf-code-block"><code data-language>`     |
//! | rule          | `<hr>`                                                 |
//! | hardBreak     | `<br>`                                                 |
//! | mention       | `<span class="adf-mention" data-id>`                   |
//! | emoji         | `<span class="adf-emoji">`                             |
//! | inlineCard    | `<a class="adf-inline-card" href>`                     |
//! | panel         | `<div class="adf-panel adf-panel-TYPE">`               |
//! | status        | `<span class="adf-status" data-color>`                 |
//! | anything else | `<div class="adf-unknown" data-type>` with children    |
//!
//! Marks map to `<strong>`, `<em>`, `<s>`, `<code>`, `<u>`, `<a href>`, `<sub>`/`<sup>` and
//! `<span style="color: ...">`.

mod serializer;

pub use serializer::{html_formatter, serialize_dom};

use crate::adf::Node;
use crate::engine::formatter::Formatter;
use crate::error::ConvertError;
use crate::format::{parse_bool_option, unknown_option, Format};
use markup5ever_rcdom::Handle;
use std::collections::HashMap;

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Wrap the fragment into a complete page.
    pub standalone: bool,
    /// Page title, only used when `standalone` is set.
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            standalone: false,
            title: "Document".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn with_overrides(mut self, options: &HashMap<String, String>) -> Result<Self, ConvertError> {
        for (key, value) in options {
            match key.as_str() {
                "standalone" => self.standalone = parse_bool_option(key, value)?,
                "title" => self.title = value.clone(),
                _ => return Err(unknown_option("html", key)),
            }
        }
        Ok(self)
    }
}

/// Format implementation for HTML
pub struct HtmlFormat {
    options: HtmlOptions,
    formatter: Formatter<Handle>,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(HtmlOptions::default())
    }
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        HtmlFormat {
            options,
            formatter: html_formatter(),
        }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 fragment or standalone page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        serializer::serialize_to_html(doc, &self.formatter, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let options = self.options.clone().with_overrides(options)?;
        serializer::serialize_to_html(doc, &self.formatter, &options)
    }
}
