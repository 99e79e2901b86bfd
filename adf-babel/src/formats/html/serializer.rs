//! HTML handler table
//!
//! Handlers build `markup5ever_rcdom` nodes directly; the finished tree is handed to the
//! html5ever serializer, which owns all escaping of text and attribute values.

use super::HtmlOptions;
use crate::adf::{ContextOverride, ConversionContext, ListKind, Mark, Node};
use crate::engine::formatter::Formatter;
use crate::engine::marks::Next;
use crate::engine::Children;
use crate::error::ConvertError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Build the HTML formatter. Every handler returns one DOM node.
pub fn html_formatter() -> Formatter<Handle> {
    Formatter::<Handle>::new(unknown)
        .with_node("doc", |_node, children, _ctx, _idx| {
            element("div", vec![("class", "adf-document")], children.process())
        })
        .with_node("paragraph", |_node, children, _ctx, _idx| {
            element("p", vec![], children.process())
        })
        .with_node("heading", heading)
        .with_node("bulletList", |node, children, ctx, _idx| {
            list(node, children, ctx, ListKind::Bullet)
        })
        .with_node("orderedList", |node, children, ctx, _idx| {
            list(node, children, ctx, ListKind::Ordered)
        })
        .with_node("listItem", |_node, children, _ctx, _idx| {
            element("li", vec![], children.process())
        })
        .with_node("blockquote", |_node, children, _ctx, _idx| {
            element("blockquote", vec![], children.process())
        })
        .with_node("codeBlock", code_block)
        .with_node("rule", |_node, _children, _ctx, _idx| {
            create_element("hr", vec![])
        })
        .with_node("hardBreak", |_node, _children, _ctx, _idx| {
            create_element("br", vec![])
        })
        .with_node("text", |node, _children, _ctx, _idx| {
            create_text(node.text_or_empty())
        })
        .with_node("mention", |node, _children, _ctx, _idx| {
            let name = node
                .attr_str("text")
                .or_else(|| node.attr_str("id"))
                .unwrap_or("mention");
            let id = node.attr_str("id").unwrap_or("");
            element(
                "span",
                vec![("class", "adf-mention"), ("data-id", id)],
                vec![create_text(&format!("@{}", name.trim_start_matches('@')))],
            )
        })
        .with_node("emoji", |node, _children, _ctx, _idx| {
            let text = node
                .attr_str("text")
                .or_else(|| node.attr_str("shortName"))
                .unwrap_or("");
            element(
                "span",
                vec![("class", "adf-emoji")],
                vec![create_text(text)],
            )
        })
        .with_node("inlineCard", |node, _children, _ctx, _idx| {
            let url = node.attr_str("url").unwrap_or("");
            element(
                "a",
                vec![("href", url), ("class", "adf-inline-card")],
                vec![create_text(url)],
            )
        })
        .with_node("panel", panel)
        .with_node("status", |node, _children, _ctx, _idx| {
            let text = node.attr_str("text").unwrap_or("status");
            let color = node.attr_str("color").unwrap_or("neutral");
            element(
                "span",
                vec![("class", "adf-status"), ("data-color", color)],
                vec![create_text(&text.to_uppercase())],
            )
        })
        .with_mark("text", "strong", |_mark, next, _node, _ctx| wrap("strong", vec![], next))
        .with_mark("text", "em", |_mark, next, _node, _ctx| wrap("em", vec![], next))
        .with_mark("text", "strike", |_mark, next, _node, _ctx| wrap("s", vec![], next))
        .with_mark("text", "code", |_mark, next, _node, _ctx| wrap("code", vec![], next))
        .with_mark("text", "underline", |_mark, next, _node, _ctx| wrap("u", vec![], next))
        .with_mark("text", "link", |mark, next, _node, _ctx| {
            let href = mark.attr_str("href").unwrap_or("");
            wrap("a", vec![("href", href)], next)
        })
        .with_mark("text", "subsup", subsup)
        .with_mark("text", "textColor", |mark, next, _node, _ctx| {
            match mark.attr_str("color") {
                Some(color) => {
                    let style = format!("color: {color}");
                    wrap("span", vec![("style", style.as_str())], next)
                }
                None => next.resolve(),
            }
        })
}

/// Nodes without a handler keep their children inside a tagged container.
fn unknown(
    node: &Node,
    children: &Children<'_, Handle>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> Handle {
    element(
        "div",
        vec![("class", "adf-unknown"), ("data-type", node.node_type.as_str())],
        children.process(),
    )
}

fn heading(
    node: &Node,
    children: &Children<'_, Handle>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> Handle {
    let requested = node.attr_u64("level").filter(|&level| level > 0).unwrap_or(1);
    let level = requested.min(6);
    if level != requested {
        tracing::trace!(requested, level, "clamping heading level");
    }
    element(&format!("h{level}"), vec![], children.process())
}

fn list(
    node: &Node,
    children: &Children<'_, Handle>,
    ctx: &ConversionContext,
    kind: ListKind,
) -> Handle {
    let items = children.process_with(
        ContextOverride::inherit()
            .list_depth(ctx.nested_list_depth())
            .list_kind(kind),
    );
    match kind {
        ListKind::Bullet => element("ul", vec![], items),
        ListKind::Ordered => {
            let start = node.attr_u64("order").filter(|&order| order != 1);
            match start {
                Some(start) => {
                    let start = start.to_string();
                    element("ol", vec![("start", start.as_str())], items)
                }
                None => element("ol", vec![], items),
            }
        }
    }
}

fn code_block(
    node: &Node,
    _children: &Children<'_, Handle>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> Handle {
    let code: Vec<&str> = node.content.iter().map(Node::text_or_empty).collect();
    let code_el = match node.attr_str("language") {
        Some(language) => create_element("code", vec![("data-language", language)]),
        None => create_element("code", vec![]),
    };
    code_el
        .children
        .borrow_mut()
        .push(create_text(&code.join("\n")));
    element("pre", vec![("class", "adf-code-block")], vec![code_el])
}

fn panel(
    node: &Node,
    children: &Children<'_, Handle>,
    _ctx: &ConversionContext,
    _idx: usize,
) -> Handle {
    let panel_type = node.attr_str("panelType").unwrap_or("info");
    let class = format!("adf-panel adf-panel-{panel_type}");
    element(
        "div",
        vec![("class", class.as_str()), ("data-panel-type", panel_type)],
        children.process(),
    )
}

fn subsup(mark: &Mark, next: Next<'_, Handle>, _node: &Node, _ctx: &ConversionContext) -> Handle {
    match mark.attr_str("type") {
        Some("sub") => wrap("sub", vec![], next),
        _ => wrap("sup", vec![], next),
    }
}

fn wrap(tag: &str, attrs: Vec<(&str, &str)>, next: Next<'_, Handle>) -> Handle {
    element(tag, attrs, vec![next.resolve()])
}

/// Create an element and adopt `children`.
fn element(tag: &str, attrs: Vec<(&str, &str)>, children: Vec<Handle>) -> Handle {
    let el = create_element(tag, attrs);
    el.children.borrow_mut().extend(children);
    el
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize a built tree, including its root element.
pub fn serialize_dom(root: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(root.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        ConvertError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| ConvertError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Run the formatter and serialize, wrapping into a page when asked to.
pub fn serialize_to_html(
    doc: &Node,
    formatter: &Formatter<Handle>,
    options: &HtmlOptions,
) -> Result<String, ConvertError> {
    let root = crate::engine::run(doc, formatter)?;
    let body = serialize_dom(&root)?;

    if options.standalone {
        Ok(wrap_in_document(&body, &options.title))
    } else {
        Ok(body)
    }
}

/// Wrap the content in a minimal HTML5 page
fn wrap_in_document(body_html: &str, title: &str) -> String {
    let escaped_title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="adf-babel">
  <title>{escaped_title}</title>
</head>
<body>
{body_html}
</body>
</html>
"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
