//! Icon mapping for the tree visualization

/// Get the Unicode icon for an ADF node type
///
/// Unknown types share a single hollow circle so they stand out in a tree.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "doc" => "⧉",
        "heading" => "§",
        "paragraph" => "¶",
        "bulletList" | "orderedList" => "☰",
        "listItem" => "•",
        "blockquote" => "\"",
        "codeBlock" => "𝒱",
        "panel" => "▣",
        "rule" => "⎯",
        "text" => "◦",
        "hardBreak" => "↵",
        "mention" => "@",
        "emoji" => "☺",
        "inlineCard" => "⊕",
        "status" => "◫",
        _ => "○",
    }
}
