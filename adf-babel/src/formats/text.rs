//! Plain text format
//!
//! Strips all decoration: blocks are separated by blank lines, list items get `- ` or `N. `,
//! and links keep their target in parentheses after the text.

use crate::adf::{ContextOverride, ConversionContext, ListKind, Mark, Node};
use crate::engine::formatter::Formatter;
use crate::engine::marks::Next;
use crate::engine::Children;
use crate::error::ConvertError;
use crate::format::Format;

/// Marks with no plain text rendering; registered so they pass through quietly.
const DECORATIVE_MARKS: &[&str] = &[
    "strong",
    "em",
    "strike",
    "code",
    "underline",
    "textColor",
    "subsup",
];

pub fn text_formatter() -> Formatter<String> {
    let mut formatter = Formatter::<String>::new(join)
        .with_node("doc", |_node, children, _ctx, _idx| {
            let body = children.process().concat();
            let body = body.trim_end();
            if body.is_empty() {
                String::new()
            } else {
                format!("{body}\n")
            }
        })
        .with_node("paragraph", block)
        .with_node("heading", block)
        .with_node("bulletList", |_node, children, ctx, _idx| {
            list(children, ctx, ListKind::Bullet)
        })
        .with_node("orderedList", |_node, children, ctx, _idx| {
            list(children, ctx, ListKind::Ordered)
        })
        .with_node("listItem", list_item)
        .with_node("blockquote", |_node, children, _ctx, _idx| {
            let content = children.process().concat();
            let indented: Vec<String> = content
                .trim()
                .lines()
                .map(|line| format!("    {line}"))
                .collect();
            format!("{}\n\n", indented.join("\n"))
        })
        .with_node("codeBlock", |node, _children, _ctx, _idx| {
            let code: Vec<&str> = node.content.iter().map(Node::text_or_empty).collect();
            format!("{}\n\n", code.join("\n"))
        })
        .with_node("rule", |_node, _children, _ctx, _idx| "----\n\n".to_string())
        .with_node("text", |node, _children, _ctx, _idx| {
            node.text_or_empty().to_string()
        })
        .with_node("hardBreak", |_node, _children, _ctx, _idx| "\n".to_string())
        .with_node("mention", |node, _children, _ctx, _idx| {
            let name = node
                .attr_str("text")
                .or_else(|| node.attr_str("id"))
                .unwrap_or("mention");
            format!("@{}", name.trim_start_matches('@'))
        })
        .with_node("emoji", |node, _children, _ctx, _idx| {
            node.attr_str("text")
                .or_else(|| node.attr_str("shortName"))
                .unwrap_or("")
                .to_string()
        })
        .with_node("inlineCard", |node, _children, _ctx, _idx| {
            node.attr_str("url").unwrap_or("").to_string()
        })
        .with_node("status", |node, _children, _ctx, _idx| {
            format!("[{}]", node.attr_str("text").unwrap_or("status").to_uppercase())
        })
        .with_mark("text", "link", link);

    for mark in DECORATIVE_MARKS {
        formatter = formatter.with_mark("text", *mark, |_mark, next, _node, _ctx| next.resolve());
    }
    formatter
}

fn join(
    _node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    children.process().concat()
}

fn block(
    _node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    format!("{}\n\n", children.process().concat())
}

fn list(children: &Children<'_, String>, ctx: &ConversionContext, kind: ListKind) -> String {
    let items = children
        .process_with(
            ContextOverride::inherit()
                .list_depth(ctx.nested_list_depth())
                .list_kind(kind),
        )
        .concat();
    if ctx.is_inside_list() {
        items
    } else {
        items + "\n"
    }
}

fn list_item(
    node: &Node,
    children: &Children<'_, String>,
    ctx: &ConversionContext,
    sibling_index: usize,
) -> String {
    let indent = "  ".repeat(ctx.list_depth.unwrap_or(0));
    let marker = match ctx.list_kind {
        Some(ListKind::Ordered) => {
            let number = node
                .attr_u64("order")
                .unwrap_or(sibling_index as u64)
                .saturating_add(1);
            format!("{number}. ")
        }
        _ => "- ".to_string(),
    };
    let content = children.process().concat();
    let lines: Vec<&str> = content
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    format!("{indent}{marker}{}\n", lines.join("\n"))
}

fn link(mark: &Mark, next: Next<'_, String>, _node: &Node, _ctx: &ConversionContext) -> String {
    let text = next.resolve();
    match mark.attr_str("href") {
        Some(href) if href != text => format!("{text} ({href})"),
        _ => text,
    }
}

/// Format implementation for plain text
pub struct TextFormat {
    formatter: Formatter<String>,
}

impl Default for TextFormat {
    fn default() -> Self {
        TextFormat {
            formatter: text_formatter(),
        }
    }
}

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text without markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        crate::engine::run(doc, &self.formatter)
    }
}
