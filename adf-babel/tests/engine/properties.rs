//! Property-based checks over generated trees.

use adf_babel::{run_with_sink, CollectingSink, Formatter, Mark, Node, NullSink};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = "[a-z ]{0,6}".prop_map(Node::text);
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(vec!["paragraph", "heading", "bulletList", "listItem", "widget"]),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(node_type, content)| Node::new(node_type).with_content(content))
    })
}

fn preorder(node: &Node, index: usize, out: &mut Vec<(String, usize)>) {
    out.push((node.node_type.clone(), index));
    for (i, child) in node.content.iter().enumerate() {
        preorder(child, i, out);
    }
}

fn concat_text(node: &Node) -> String {
    node.text_or_empty().to_string() + &node.content.iter().map(concat_text).collect::<String>()
}

fn marks_formatter() -> Formatter<String> {
    Formatter::<String>::new(|_node, children, _ctx, _idx| children.process().concat())
        .with_node("text", |node, _children, _ctx, _idx| {
            node.text_or_empty().to_string()
        })
        .with_mark("text", "strong", |_mark, next, _node, _ctx| {
            format!("**{}**", next.resolve())
        })
        .with_mark("text", "em", |_mark, next, _node, _ctx| {
            format!("_{}_", next.resolve())
        })
}

proptest! {
    #[test]
    fn visits_every_node_in_pre_order(content in prop::collection::vec(arb_node(), 0..5)) {
        let document = Node::document(content);
        let visits = Arc::new(Mutex::new(Vec::new()));
        let record = visits.clone();
        let formatter = Formatter::<()>::new(move |node, children, _ctx, idx| {
            record.lock().unwrap().push((node.node_type.clone(), idx));
            children.process();
        });

        run_with_sink(&document, &formatter, &NullSink).unwrap();

        let mut expected = Vec::new();
        preorder(&document, 0, &mut expected);
        prop_assert_eq!(&*visits.lock().unwrap(), &expected);
        prop_assert_eq!(expected.len(), document.subtree_len());
    }

    #[test]
    fn default_join_preserves_all_text(content in prop::collection::vec(arb_node(), 0..5)) {
        let document = Node::document(content);
        let result = run_with_sink(&document, &marks_formatter(), &NullSink).unwrap();
        prop_assert_eq!(result, concat_text(&document));
    }

    #[test]
    fn unknown_marks_do_not_change_output(
        known in prop::collection::vec(prop::sample::select(vec!["strong", "em"]), 0..4),
        position in any::<prop::sample::Index>(),
        body in "[a-z]{1,8}",
    ) {
        let marks: Vec<Mark> = known.iter().map(|m| Mark::new(*m)).collect();
        let mut with_unknown = marks.clone();
        with_unknown.insert(position.index(marks.len() + 1), Mark::new("mystery"));

        let plain = Node::document(vec![Node::text(body.clone()).with_marks(marks)]);
        let noisy = Node::document(vec![Node::text(body).with_marks(with_unknown)]);

        let sink = CollectingSink::new();
        prop_assert_eq!(
            run_with_sink(&plain, &marks_formatter(), &NullSink).unwrap(),
            run_with_sink(&noisy, &marks_formatter(), &sink).unwrap()
        );
        prop_assert!(sink
            .diagnostics()
            .iter()
            .any(|d| d.to_string().contains("\"mystery\"")));
    }
}
