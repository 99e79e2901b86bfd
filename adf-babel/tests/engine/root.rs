//! Root validation and implicit document wrapping.

use crate::common::*;
use adf_babel::{
    run_json_with_sink, run_with_sink, CollectingSink, ConvertError, Diagnostic, Formatter,
    Severity,
};
use serde_json::json;

fn tagging_formatter() -> Formatter<String> {
    Formatter::<String>::new(|node, children, _ctx, idx| {
        format!("{}#{idx}[{}]", node.node_type, children.process().concat())
    })
    .with_node("text", |node, _children, _ctx, _idx| {
        node.text_or_empty().to_string()
    })
}

#[test]
fn test_non_doc_root_is_wrapped() {
    let sink = CollectingSink::new();
    let wrapped = run_with_sink(&para_text("x"), &tagging_formatter(), &sink).unwrap();
    let explicit =
        run_with_sink(&doc(vec![para_text("x")]), &tagging_formatter(), &CollectingSink::new())
            .unwrap();

    assert_eq!(wrapped, "doc#0[paragraph#0[x]]");
    assert_eq!(wrapped, explicit);

    let diagnostics: Vec<Diagnostic> = sink
        .take()
        .into_iter()
        .filter(|d| d.severity() == Severity::Warning)
        .collect();
    assert_eq!(
        diagnostics,
        vec![Diagnostic::ImplicitDocumentRoot {
            root_type: "paragraph".to_string()
        }]
    );
}

#[test]
fn test_text_root_is_wrapped() {
    let result = run_with_sink(&text("bare"), &tagging_formatter(), &CollectingSink::new()).unwrap();
    assert_eq!(result, "doc#0[bare]");
}

#[test]
fn test_malformed_json_roots() {
    let cases = [
        json!(null),
        json!(42),
        json!("doc"),
        json!([{ "type": "doc" }]),
        json!({ "content": [] }),
        json!({ "type": "" }),
        json!({ "type": ["doc"] }),
    ];

    for value in cases {
        let sink = CollectingSink::new();
        let err = run_json_with_sink(&value, &tagging_formatter(), &sink).unwrap_err();
        assert!(
            matches!(err, ConvertError::MalformedInput(_)),
            "{value} gave {err:?}"
        );
        assert!(sink.is_empty(), "no traversal for {value}");
    }
}

#[test]
fn test_unknown_fields_are_ignored() {
    let value = json!({
        "type": "doc",
        "version": 1,
        "content": [{ "type": "text", "text": "ok", "localId": "abc" }]
    });
    let result = run_json_with_sink(&value, &tagging_formatter(), &CollectingSink::new()).unwrap();
    assert_eq!(result, "doc#0[ok]");
}
