//! Treeviz: a visual representation of the document tree
//!
//! The formatter builds a [`VizNode`] tree (one per document node) and a separate pass draws it
//! with box connectors. Drawing needs to know whether a child is the last of its siblings, which
//! only the parent knows once all children are formatted, hence the two steps.
//!
//! Format:
//!
//! ```text
//! ⧉ doc (2 items)
//! ├─ § heading
//! │ └─ ◦ "Title"
//! └─ ☰ bulletList (1 items)
//!   └─ • listItem
//!     └─ ¶ paragraph
//!       └─ ◦ "Item with bold" [strong]
//! ```
//!
//! Text labels are quoted and truncated to 30 characters. With `show-attrs`, attributes follow
//! the label as `{key=value, ...}`.

use super::icons::get_icon;
use crate::adf::{Attrs, ConversionContext, Node};
use crate::engine::formatter::Formatter;
use crate::engine::Children;
use crate::error::ConvertError;
use crate::format::{parse_bool_option, unknown_option, Format};
use serde_json::Value;
use std::collections::HashMap;

const MAX_LABEL_CHARS: usize = 30;

/// Marks the visualization lists in labels rather than rendering.
const KNOWN_MARKS: &[&str] = &[
    "strong",
    "em",
    "strike",
    "code",
    "link",
    "underline",
    "textColor",
    "subsup",
];

/// One drawn line and its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VizNode {
    pub icon: &'static str,
    pub label: String,
    pub children: Vec<VizNode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreevizOptions {
    pub show_attrs: bool,
}

impl TreevizOptions {
    pub fn with_overrides(mut self, options: &HashMap<String, String>) -> Result<Self, ConvertError> {
        for (key, value) in options {
            match key.as_str() {
                "show-attrs" => self.show_attrs = parse_bool_option(key, value)?,
                _ => return Err(unknown_option("treeviz", key)),
            }
        }
        Ok(self)
    }
}

pub fn treeviz_formatter(options: TreevizOptions) -> Formatter<VizNode> {
    let mut formatter = Formatter::<VizNode>::new(move |node, children, ctx, idx| {
        viz_node(node, children, ctx, idx, &options)
    });
    for mark in KNOWN_MARKS {
        formatter = formatter.with_mark("text", *mark, |_mark, next, _node, _ctx| next.resolve());
    }
    formatter
}

fn viz_node(
    node: &Node,
    children: &Children<'_, VizNode>,
    _ctx: &ConversionContext,
    _idx: usize,
    options: &TreevizOptions,
) -> VizNode {
    let mut label = if node.is_text() {
        text_label(node)
    } else if children.is_empty() {
        node.node_type.clone()
    } else if node.is_document() || node.node_type.ends_with("List") {
        format!("{} ({} items)", node.node_type, children.len())
    } else {
        node.node_type.clone()
    };

    if options.show_attrs {
        if let Some(attrs) = node.attrs.as_ref().filter(|attrs| !attrs.is_empty()) {
            label.push(' ');
            label.push_str(&attrs_label(attrs));
        }
    }

    VizNode {
        icon: get_icon(&node.node_type),
        label,
        // Code is leaf content for display purposes
        children: if node.node_type == "codeBlock" {
            Vec::new()
        } else {
            children.process()
        },
    }
}

fn text_label(node: &Node) -> String {
    let text = truncate(&node.text_or_empty().replace('\n', "↵"), MAX_LABEL_CHARS);
    if node.marks.is_empty() {
        format!("\"{text}\"")
    } else {
        let marks: Vec<&str> = node.marks.iter().map(|m| m.mark_type.as_str()).collect();
        format!("\"{text}\" [{}]", marks.join(", "))
    }
}

fn attrs_label(attrs: &Attrs) -> String {
    let mut pairs: Vec<String> = attrs
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}={s}"),
            other => format!("{key}={other}"),
        })
        .collect();
    pairs.sort();
    format!("{{{}}}", pairs.join(", "))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars - 1).collect();
        format!("{kept}…")
    }
}

/// Draw a visualization tree with `├─` / `└─` connectors.
pub fn render(root: &VizNode) -> String {
    let mut output = format!("{} {}\n", root.icon, root.label);
    render_children(&root.children, "", &mut output);
    output
}

fn render_children(children: &[VizNode], prefix: &str, output: &mut String) {
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == child_count - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!(
            "{}{} {} {}\n",
            prefix, connector, child.icon, child.label
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        render_children(&child.children, &child_prefix, output);
    }
}

/// Format implementation for the tree visualization
pub struct TreevizFormat {
    options: TreevizOptions,
    formatter: Formatter<VizNode>,
}

impl Default for TreevizFormat {
    fn default() -> Self {
        Self::new(TreevizOptions::default())
    }
}

impl TreevizFormat {
    pub fn new(options: TreevizOptions) -> Self {
        TreevizFormat {
            options,
            formatter: treeviz_formatter(options),
        }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of the document nodes"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree"]
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        crate::engine::run(doc, &self.formatter).map(|root| render(&root))
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
        crate::engine::run(doc, &treeviz_formatter(options)).map(|root| render(&root))
    }
}
