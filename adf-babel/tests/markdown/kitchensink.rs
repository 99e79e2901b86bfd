//! Full fixture through the Markdown and treeviz formats.
//!
//! The Markdown output is also parsed back with comrak to make sure a real CommonMark reader
//! sees the structure we meant to produce.

use super::to_markdown;
use crate::common::load_fixture;
use adf_babel::formats::TreevizFormat;
use adf_babel::Format;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

const EXPECTED: &str = "# Release notes\n\n\
Version **2.0** ships *today*. See [the docs](https://example.com/docs).\n\n\
## Changes\n\n\
* Faster `render`\n\
* New formats\n  1. HTML\n  2. Plain text\n\
* ~~Removed~~ the old CLI\n\n\
> Upgrade carefully.\n\n\
```rust\nlet doc = parse_document(&json)?;\n```\n\n\
---\n\n\
> **Panel (warning):**\n> Back up first\n\n\
Owner: @Dana [DONE] :tada:  \n[https://example.com/ticket/1](https://example.com/ticket/1)\n\n\
Fallback text\n\n";

#[test]
fn test_kitchensink_markdown() {
    let document = load_fixture("kitchensink.json");
    assert_eq!(to_markdown(&document), EXPECTED);
}

fn kinds<'a>(root: &'a AstNode<'a>) -> Vec<&'static str> {
    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Heading(_) => Some("heading"),
            NodeValue::List(_) => Some("list"),
            NodeValue::Item(_) => Some("item"),
            NodeValue::CodeBlock(_) => Some("code_block"),
            NodeValue::BlockQuote => Some("blockquote"),
            NodeValue::ThematicBreak => Some("rule"),
            NodeValue::Strong => Some("strong"),
            NodeValue::Emph => Some("emph"),
            NodeValue::Link(_) => Some("link"),
            _ => None,
        })
        .collect()
}

#[test]
fn test_kitchensink_markdown_parses_back() {
    let markdown = to_markdown(&load_fixture("kitchensink.json"));
    let arena = Arena::new();
    let root = parse_document(&arena, &markdown, &ComrakOptions::default());
    let found = kinds(root);

    let count = |kind: &str| found.iter().filter(|k| **k == kind).count();
    assert_eq!(count("heading"), 2);
    // Outer bullet list plus the ordered list nested in its second item
    assert_eq!(count("list"), 2);
    assert_eq!(count("item"), 5);
    assert_eq!(count("code_block"), 1);
    assert_eq!(count("rule"), 1);
    // Blockquote and the panel rendered as one
    assert_eq!(count("blockquote"), 2);
    assert!(count("strong") >= 2);
    assert_eq!(count("emph"), 1);
    // Docs link and the inline card
    assert_eq!(count("link"), 2);

    let code = root
        .descendants()
        .find_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) => Some((block.info.clone(), block.literal.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(code.0, "rust");
    assert_eq!(code.1, "let doc = parse_document(&json)?;\n");
}

#[test]
fn test_kitchensink_treeviz() {
    let output = TreevizFormat::default()
        .serialize(&load_fixture("kitchensink.json"))
        .unwrap();
    insta::assert_snapshot!(output, @r###"
⧉ doc (10 items)
├─ § heading
│ └─ ◦ "Release notes"
├─ ¶ paragraph
│ ├─ ◦ "Version "
│ ├─ ◦ "2.0" [strong]
│ ├─ ◦ " ships "
│ ├─ ◦ "today" [em, underline]
│ ├─ ◦ ". See "
│ ├─ ◦ "the docs" [link]
│ └─ ◦ "."
├─ § heading
│ └─ ◦ "Changes"
├─ ☰ bulletList (3 items)
│ ├─ • listItem
│ │ └─ ¶ paragraph
│ │   ├─ ◦ "Faster "
│ │   └─ ◦ "render" [code]
│ ├─ • listItem
│ │ ├─ ¶ paragraph
│ │ │ └─ ◦ "New formats"
│ │ └─ ☰ orderedList (2 items)
│ │   ├─ • listItem
│ │   │ └─ ¶ paragraph
│ │   │   └─ ◦ "HTML"
│ │   └─ • listItem
│ │     └─ ¶ paragraph
│ │       └─ ◦ "Plain text"
│ └─ • listItem
│   └─ ¶ paragraph
│     ├─ ◦ "Removed" [strike]
│     └─ ◦ " the old CLI"
├─ " blockquote
│ └─ ¶ paragraph
│   └─ ◦ "Upgrade carefully."
├─ 𝒱 codeBlock
├─ ⎯ rule
├─ ▣ panel
│ └─ ¶ paragraph
│   └─ ◦ "Back up first"
├─ ¶ paragraph
│ ├─ ◦ "Owner: "
│ ├─ @ mention
│ ├─ ◦ " "
│ ├─ ◫ status
│ ├─ ◦ " "
│ ├─ ☺ emoji
│ ├─ ↵ hardBreak
│ └─ ⊕ inlineCard
└─ ○ extension
  └─ ¶ paragraph
    └─ ◦ "Fallback text"
"###);
}
