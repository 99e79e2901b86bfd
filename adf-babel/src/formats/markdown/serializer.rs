//! Markdown handler table
//!
//! Block handlers return their text with its trailing blank line already attached, so a parent
//! only ever concatenates. Lists are the one place that needs context: the list handlers push
//! `(depth, kind)` down to their items, and items use it for indentation and numbering.

use super::escape::escape_markdown;
use super::MarkdownOptions;
use crate::adf::{ContextOverride, ConversionContext, ListKind, Mark, Node};
use crate::engine::formatter::Formatter;
use crate::engine::marks::Next;
use crate::engine::Children;
use once_cell::sync::Lazy;
use regex::Regex;

/// A blank line followed by an indented list marker.
static BLANK_BEFORE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\n( *)([*+-]|[0-9]+\.)").expect("list marker pattern is valid")
});

/// Build the Markdown formatter.
pub fn markdown_formatter(options: MarkdownOptions) -> Formatter<String> {
    Formatter::<String>::new(join_children)
        .with_node("doc", join_children)
        .with_node("paragraph", paragraph)
        .with_node("heading", heading)
        .with_node("bulletList", |node, children, ctx, idx| {
            list(node, children, ctx, idx, ListKind::Bullet)
        })
        .with_node("orderedList", |node, children, ctx, idx| {
            list(node, children, ctx, idx, ListKind::Ordered)
        })
        .with_node("listItem", move |node, children, ctx, idx| {
            list_item(node, children, ctx, idx, &options)
        })
        .with_node("blockquote", blockquote)
        .with_node("codeBlock", code_block)
        .with_node("rule", |_node, _children, _ctx, _idx| "---\n\n".to_string())
        .with_node("text", move |node, _children, _ctx, _idx| {
            if options.escape_text {
                escape_markdown(node.text_or_empty())
            } else {
                node.text_or_empty().to_string()
            }
        })
        .with_node("hardBreak", |_node, _children, _ctx, _idx| "  \n".to_string())
        .with_node("mention", mention)
        .with_node("emoji", emoji)
        .with_node("inlineCard", inline_card)
        .with_node("panel", panel)
        .with_node("status", status)
        .with_mark("text", "strong", |_mark, next, _node, _ctx| wrap("**", next))
        .with_mark("text", "em", |_mark, next, _node, _ctx| wrap("*", next))
        .with_mark("text", "strike", |_mark, next, _node, _ctx| wrap("~~", next))
        .with_mark("text", "code", |_mark, next, _node, _ctx| wrap("`", next))
        .with_mark("text", "link", link)
        .with_mark("text", "underline", pass_through)
        .with_mark("text", "textColor", pass_through)
        .with_mark("text", "subsup", pass_through)
}

fn join_children(
    _node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    children.process().concat()
}

fn paragraph(
    _node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    format!("{}\n\n", children.process().concat())
}

/// Deepest heading emitted; levels past 6 are kept as written up to here.
const MAX_HEADING_LEVEL: u64 = 16;

fn heading(
    node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    let requested = node.attr_u64("level").filter(|&level| level > 0).unwrap_or(1);
    let level = requested.min(MAX_HEADING_LEVEL);
    if level != requested {
        tracing::trace!(requested, level, "capping heading level");
    }
    format!(
        "{} {}\n\n",
        "#".repeat(level as usize),
        children.process().concat()
    )
}

fn list(
    _node: &Node,
    children: &Children<'_, String>,
    ctx: &ConversionContext,
    _idx: usize,
    kind: ListKind,
) -> String {
    let items = children
        .process_with(
            ContextOverride::inherit()
                .list_depth(ctx.nested_list_depth())
                .list_kind(kind),
        )
        .concat();

    // Only the outermost list closes with a blank line; nested ones sit inside an item.
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
    options: &MarkdownOptions,
) -> String {
    let depth = ctx.list_depth.unwrap_or(0);
    let indent = options.indent(depth);
    let prefix = match ctx.list_kind {
        Some(ListKind::Ordered) => {
            let number = node
                .attr_u64("order")
                .unwrap_or(sibling_index as u64)
                .saturating_add(1);
            format!("{number}. ")
        }
        _ => format!("{} ", options.bullet_marker),
    };

    let content = children.process().concat();
    let content = tighten_nested_list(&content, options.indent(depth + 1).len(), options);

    format!("{indent}{prefix}{}\n", content.trim())
}

/// Drop the blank line between an item's paragraph and the first nested list item, so the
/// nested list stays tight.
fn tighten_nested_list(content: &str, nested_indent: usize, options: &MarkdownOptions) -> String {
    let found = BLANK_BEFORE_MARKER.captures_iter(content).find(|caps| {
        let marker = &caps[2];
        let is_own_marker = marker.ends_with('.') || marker.starts_with(options.bullet_marker);
        caps[1].len() == nested_indent && is_own_marker
    });

    match found.and_then(|caps| caps.get(0)) {
        // Keep the second newline, drop the first.
        Some(m) => format!("{}{}", &content[..m.start()], &content[m.start() + 1..]),
        None => content.to_string(),
    }
}

fn blockquote(
    _node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    let content = children.process().concat();
    let quoted: Vec<String> = content
        .trim()
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect();
    format!("{}\n\n", quoted.join("\n"))
}

fn code_block(
    node: &Node,
    _children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    // Code is verbatim: children are read directly, never formatted or escaped.
    let language = node.attr_str("language").unwrap_or("");
    let code: Vec<&str> = node.content.iter().map(Node::text_or_empty).collect();
    format!("```{language}\n{}\n```\n\n", code.join("\n"))
}

fn mention(
    node: &Node,
    _children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    let name = filled(node, "text")
        .or_else(|| filled(node, "id"))
        .unwrap_or("mention");
    format!("@{name}")
}

fn emoji(
    node: &Node,
    _children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    filled(node, "shortName")
        .or_else(|| filled(node, "text"))
        .unwrap_or("")
        .to_string()
}

fn inline_card(
    node: &Node,
    _children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    let url = node.attr_str("url").unwrap_or("");
    format!("[{url}]({url})")
}

fn panel(
    node: &Node,
    children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    let title = match filled(node, "panelType") {
        Some(panel_type) => format!("**Panel ({panel_type}):**"),
        None => "**Panel:**".to_string(),
    };
    let content = children.process().concat();
    let body: Vec<&str> = content.trim().split('\n').collect();
    format!("> {title}\n> {}\n\n", body.join("\n> "))
}

fn status(
    node: &Node,
    _children: &Children<'_, String>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> String {
    let label = filled(node, "text")
        .map(str::to_uppercase)
        .unwrap_or_else(|| "STATUS".to_string());
    format!("[{label}]")
}

/// String attribute, treating `""` as absent.
fn filled<'a>(node: &'a Node, key: &str) -> Option<&'a str> {
    node.attr_str(key).filter(|value| !value.is_empty())
}

fn wrap(delimiter: &str, next: Next<'_, String>) -> String {
    format!("{delimiter}{}{delimiter}", next.resolve())
}

fn link(mark: &Mark, next: Next<'_, String>, _node: &Node, _ctx: &ConversionContext) -> String {
    let href = mark.attr_str("href").unwrap_or("");
    format!("[{}]({href})", next.resolve())
}

fn pass_through(
    _mark: &Mark,
    next: Next<'_, String>,
    _node: &Node,
    _ctx: &ConversionContext,
) -> String {
    next.resolve()
}
