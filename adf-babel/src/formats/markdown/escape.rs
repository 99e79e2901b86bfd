//! Markdown escaping for text leaves.

/// Characters that get a backslash in front of them.
const SPECIAL: &[char] = &[
    '*', '_', '~', '`', '[', ']', '(', ')', '#', '+', '-', '!', '|', '>',
];

/// Escape text so Markdown renders it literally.
///
/// Backslashes are doubled first, then every character in the special set
/// (``*_~`[]()#+-!|>``) is prefixed with one. Everything else is untouched,
/// including `<`, `.` and digits.
///
/// ```ignore
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// assert_eq!(escape_markdown("C:\\tmp"), "C:\\\\tmp");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            c if SPECIAL.contains(&c) => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}
