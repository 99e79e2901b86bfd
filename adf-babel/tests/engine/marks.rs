//! Mark composition: order, unknown marks, suppression.

use crate::common::*;
use adf_babel::{run_with_sink, CollectingSink, Diagnostic, Formatter, Mark, Node};

fn marks_formatter() -> Formatter<String> {
    Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
        .with_node("text", |node, _children, _ctx, _idx| {
            node.text_or_empty().to_string()
        })
        .with_mark("text", "strong", |_mark, next, _node, _ctx| {
            format!("**{}**", next.resolve())
        })
        .with_mark("text", "em", |_mark, next, _node, _ctx| {
            format!("*{}*", next.resolve())
        })
}

fn render(document: &Node, formatter: &Formatter<String>) -> String {
    run_with_sink(document, formatter, &CollectingSink::new()).unwrap()
}

#[test]
fn test_marks_nest_first_outermost() {
    let document = doc(vec![para(vec![
        marked("Some bold and italic text", &["strong", "em"]),
        text(" and some normal text."),
    ])]);

    assert_eq!(
        render(&document, &marks_formatter()),
        "***Some bold and italic text*** and some normal text."
    );
}

#[test]
fn test_mark_order_is_significant() {
    let formatter = Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
        .with_node("text", |node, _children, _ctx, _idx| {
            node.text_or_empty().to_string()
        })
        .with_mark("text", "a", |_mark, next, _node, _ctx| format!("A({})", next.resolve()))
        .with_mark("text", "b", |_mark, next, _node, _ctx| format!("B({})", next.resolve()));

    assert_eq!(render(&doc(vec![marked("x", &["a", "b"])]), &formatter), "A(B(x))");
    assert_eq!(render(&doc(vec![marked("x", &["b", "a"])]), &formatter), "B(A(x))");
}

#[test]
fn test_unknown_marks_are_transparent() {
    let document = doc(vec![para(vec![marked(
        "Text with unknown mark",
        &["unknownMark", "strong"],
    )])]);

    let sink = CollectingSink::new();
    let result = run_with_sink(&document, &marks_formatter(), &sink).unwrap();
    assert_eq!(result, "**Text with unknown mark**");
    assert_eq!(
        sink.take(),
        vec![
            Diagnostic::UnknownNodeType {
                node_type: "doc".to_string()
            },
            Diagnostic::UnknownNodeType {
                node_type: "paragraph".to_string()
            },
            Diagnostic::UnsupportedMark {
                node_type: "text".to_string(),
                mark_type: "unknownMark".to_string()
            },
        ]
    );
}

#[test]
fn test_marks_are_keyed_by_parent_type() {
    // A strong handler registered for another parent must not fire on text.
    let formatter = Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
        .with_node("text", |node, _children, _ctx, _idx| {
            node.text_or_empty().to_string()
        })
        .with_mark("paragraph", "strong", |_mark, next, _node, _ctx| {
            format!("!!{}!!", next.resolve())
        });

    assert_eq!(render(&doc(vec![marked("x", &["strong"])]), &formatter), "x");
}

#[test]
fn test_marks_on_non_text_nodes_are_ignored() {
    let paragraph = para_text("plain").with_marks(vec![Mark::new("strong")]);
    assert_eq!(render(&doc(vec![paragraph]), &marks_formatter()), "plain");
}

#[test]
fn test_handler_can_suppress_inner_layers() {
    let formatter = marks_formatter().with_mark("text", "redacted", |_mark, next, _node, _ctx| {
        drop(next);
        "[redacted]".to_string()
    });

    let document = doc(vec![marked("secret", &["redacted", "strong"])]);
    assert_eq!(render(&document, &formatter), "[redacted]");
}

#[test]
fn test_mark_handler_sees_attrs_and_node() {
    let formatter = marks_formatter().with_mark("text", "link", |mark, next, node, _ctx| {
        let href = mark.attr_str("href").unwrap_or("");
        format!("[{}]({href} \"{}\")", next.resolve(), node.text_or_empty())
    });

    let link = Node::text("site").with_marks(vec![
        Mark::new("link").with_attr("href", "https://example.com"),
        Mark::new("em"),
    ]);
    assert_eq!(
        render(&doc(vec![link]), &formatter),
        "[*site*](https://example.com \"site\")"
    );
}
