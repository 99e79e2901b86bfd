//! Marks on text and escaping.

use super::{to_markdown, to_markdown_with};
use crate::common::*;
use adf_babel::formats::markdown::MarkdownOptions;
use adf_babel::{Mark, Node};

fn single(node: Node) -> String {
    to_markdown(&doc(vec![para(vec![node])]))
}

#[test]
fn test_strong() {
    assert_eq!(single(marked("Bold text", &["strong"])), "**Bold text**\n\n");
}

#[test]
fn test_em() {
    assert_eq!(single(marked("Italic text", &["em"])), "*Italic text*\n\n");
}

#[test]
fn test_strike() {
    assert_eq!(single(marked("Strikethrough", &["strike"])), "~~Strikethrough~~\n\n");
}

#[test]
fn test_code() {
    let document = doc(vec![para(vec![
        text("Inline "),
        marked("code", &["code"]),
        text(" here"),
    ])]);
    assert_eq!(to_markdown(&document), "Inline `code` here\n\n");
}

#[test]
fn test_link() {
    let link = Node::text("Link text")
        .with_marks(vec![Mark::new("link").with_attr("href", "https://example.com")]);
    assert_eq!(single(link), "[Link text](https://example.com)\n\n");
}

#[test]
fn test_link_without_href() {
    let link = Node::text("Link text").with_marks(vec![Mark::new("link")]);
    assert_eq!(single(link), "[Link text]()\n\n");
}

#[test]
fn test_nested_marks() {
    assert_eq!(single(marked("Nested", &["strong", "em"])), "***Nested***\n\n");
}

#[test]
fn test_multiple_marks_apply_first_outermost() {
    assert_eq!(
        single(marked("Important deleted code", &["strong", "strike", "code"])),
        "**~~`Important deleted code`~~**\n\n"
    );
}

#[test]
fn test_unsupported_marks_pass_through() {
    let document = doc(vec![para(vec![
        text("Text "),
        marked("with underline", &["underline", "strong"]),
        text(" mark"),
    ])]);
    assert_eq!(to_markdown(&document), "Text **with underline** mark\n\n");

    assert_eq!(single(marked("tinted", &["textColor"])), "tinted\n\n");
    assert_eq!(single(marked("x2", &["subsup"])), "x2\n\n");
    assert_eq!(single(marked("odd", &["sparkle"])), "odd\n\n");
}

#[test]
fn test_escaping_happens_before_marks() {
    assert_eq!(
        single(marked("Text with *stars*", &["strong"])),
        "**Text with \\*stars\\***\n\n"
    );
}

#[test]
fn test_plain_text_escaping() {
    assert_eq!(
        single(text("1 + 1 = 2 #math [x](y) a_b")),
        "1 \\+ 1 = 2 \\#math \\[x\\]\\(y\\) a\\_b\n\n"
    );
    assert_eq!(single(text("back\\slash")), "back\\\\slash\n\n");
}

#[test]
fn test_escaping_can_be_disabled() {
    let options = MarkdownOptions {
        escape_text: false,
        ..MarkdownOptions::default()
    };
    let document = doc(vec![para(vec![marked("*raw*", &["em"])])]);
    assert_eq!(to_markdown_with(&document, options), "**raw**\n\n");
}
