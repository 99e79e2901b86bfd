//! Dispatch, visit order and sibling indices.

use crate::common::*;
use adf_babel::{
    run_json_with_sink, run_with_sink, Children, CollectingSink, ConversionContext, Diagnostic,
    Formatter, Node,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn concat_formatter() -> Formatter<String> {
    Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
        .with_node("text", |node, _children, _ctx, _idx| {
            node.text_or_empty().to_string()
        })
}

/// Handler that logs `prefix + type` and descends.
fn record(
    log: &Log,
    prefix: &'static str,
) -> impl Fn(&Node, &Children<'_, ()>, &ConversionContext, usize) + Send + Sync + 'static {
    let log = log.clone();
    move |node: &Node, children: &Children<'_, ()>, _ctx: &ConversionContext, _idx: usize| {
        log.lock().unwrap().push(format!("{prefix}{}", node.node_type));
        children.process();
    }
}

#[test]
fn test_concatenates_text() {
    let value = json!({
        "type": "doc",
        "version": 1,
        "content": [{
            "type": "paragraph",
            "content": [
                { "type": "text", "text": "Hello, " },
                { "type": "text", "text": "world!" }
            ]
        }]
    });

    let result = run_json_with_sink(&value, &concat_formatter(), &CollectingSink::new()).unwrap();
    assert_eq!(result, "Hello, world!");
}

#[test]
fn test_depth_first_order() {
    let document = doc(vec![
        para(vec![text("P1T1"), text("P1T2")]),
        Node::new("heading")
            .with_attr("level", 1)
            .with_content(vec![text("H1T1")]),
    ]);

    let log: Log = Arc::default();
    let formatter = Formatter::<()>::new(record(&log, "default:"))
        .with_node("doc", record(&log, ""))
        .with_node("paragraph", record(&log, ""))
        .with_node("heading", record(&log, ""))
        .with_node("text", record(&log, ""));

    run_with_sink(&document, &formatter, &CollectingSink::new()).unwrap();
    assert_eq!(
        *log.lock().unwrap(),
        vec!["doc", "paragraph", "text", "text", "heading", "text"]
    );
}

#[test]
fn test_default_handler_for_unknown_types() {
    let document = doc(vec![
        para_text("Child of Known"),
        Node::new("unknownNode").with_content(vec![text("Child of Unknown")]),
    ]);

    let formatter = Formatter::<String>::new(|node, children, _ctx, _idx| {
        format!("DEFAULT[{}]({})", node.node_type, children.process().join("|"))
    })
    .with_node("doc", |_node, children, _ctx, _idx| {
        format!("DOC({})", children.process().join("|"))
    })
    .with_node("paragraph", |_node, children, _ctx, _idx| {
        format!("PARAGRAPH({})", children.process().join("|"))
    })
    .with_node("text", |node, _children, _ctx, _idx| {
        format!("TEXT[{}]", node.text_or_empty())
    });

    let sink = CollectingSink::new();
    let result = run_with_sink(&document, &formatter, &sink).unwrap();
    assert_eq!(
        result,
        "DOC(PARAGRAPH(TEXT[Child of Known])|DEFAULT[unknownNode](TEXT[Child of Unknown]))"
    );
    assert_eq!(
        sink.take(),
        vec![Diagnostic::UnknownNodeType {
            node_type: "unknownNode".to_string()
        }]
    );
}

#[test]
fn test_default_fallback_matches_explicit_registration() {
    let document = doc(vec![Node::new("widget").with_content(vec![text("w")])]);
    let wrap = |node: &Node, children: &Children<'_, String>, _ctx: &ConversionContext, _idx: usize| {
        format!("<{}>{}", node.node_type, children.process().concat())
    };

    let implicit = Formatter::<String>::new(wrap).with_node("text", |node, _c, _ctx, _idx| {
        node.text_or_empty().to_string()
    });
    let explicit = Formatter::<String>::new(wrap)
        .with_node("widget", wrap)
        .with_node("doc", wrap)
        .with_node("text", |node, _c, _ctx, _idx| node.text_or_empty().to_string());

    assert_eq!(
        run_with_sink(&document, &implicit, &CollectingSink::new()).unwrap(),
        run_with_sink(&document, &explicit, &CollectingSink::new()).unwrap()
    );
}

#[test]
fn test_sibling_indices() {
    let document = doc(vec![
        ordered_list(vec![
            item("Outer 1"),
            Node::new("listItem").with_content(vec![
                para_text("Outer 2"),
                ordered_list(vec![item("Nested 2a"), item("Nested 2b")]),
            ]),
            item("Outer 3"),
        ]),
        bullet_list(vec![item("Bullet A"), item("Bullet B")]),
    ]);

    let indices: Arc<Mutex<Vec<usize>>> = Arc::default();
    let recorded = indices.clone();
    let formatter = Formatter::<()>::new(|_node, children, _ctx, _idx| {
        children.process();
    })
    .with_node("listItem", move |_node, children, _ctx, idx| {
        recorded.lock().unwrap().push(idx);
        children.process();
    });

    run_with_sink(&document, &formatter, &CollectingSink::new()).unwrap();
    assert_eq!(*indices.lock().unwrap(), vec![0, 1, 0, 1, 2, 0, 1]);
}

#[test]
fn test_children_can_be_processed_twice() {
    let document = doc(vec![para(vec![text("a"), text("b")])]);
    let formatter = concat_formatter().with_node("paragraph", |_node, children, _ctx, _idx| {
        let first = children.process().concat();
        let second = children.process().concat();
        format!("{first}|{second}")
    });

    let result = run_with_sink(&document, &formatter, &CollectingSink::new()).unwrap();
    assert_eq!(result, "ab|ab");
}

#[test]
fn test_unprocessed_children_are_never_visited() {
    let document = doc(vec![para(vec![text("hidden")])]);
    let log: Log = Arc::default();
    let seen = log.clone();
    let formatter = Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
        .with_node("paragraph", |_node, _children, _ctx, _idx| "[skipped]".to_string())
        .with_node("text", move |node, _children, _ctx, _idx| {
            seen.lock().unwrap().push(node.text_or_empty().to_string());
            node.text_or_empty().to_string()
        });

    let result = run_with_sink(&document, &formatter, &CollectingSink::new()).unwrap();
    assert_eq!(result, "[skipped]");
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_empty_document() {
    let result = run_with_sink(&doc(vec![]), &concat_formatter(), &CollectingSink::new()).unwrap();
    assert_eq!(result, "");
}

#[test]
fn test_formatter_is_reusable_across_threads() {
    let formatter = Arc::new(concat_formatter());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let formatter = formatter.clone();
            std::thread::spawn(move || {
                let document = doc(vec![para_text(&format!("run {i}"))]);
                adf_babel::run(&document, &*formatter).unwrap()
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec!["run 0", "run 1", "run 2", "run 3"]);
}
