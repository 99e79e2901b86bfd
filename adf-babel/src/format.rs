//! Format trait definition
//!
//! A [`Format`] packages a stock formatter behind a name and a set of file extensions, so the
//! registry and the cli can select it without knowing its output type.

use crate::adf::Node;
use crate::error::ConvertError;
use std::collections::HashMap;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
///         let formatter = Formatter::<String>::new(|node, children, _ctx, _idx| {
///             node.text_or_empty().to_uppercase() + &children.process().concat()
///         });
///         adf_babel::run(doc, &formatter)
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from output filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Convert a document into this format's text.
    fn serialize(&self, doc: &Node) -> Result<String, ConvertError>;

    /// Convert a document, applying string options (`--extra-*` on the cli).
    ///
    /// The default implementation accepts no options at all.
    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(ConvertError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Parse a boolean option value; a bare flag arrives as `"true"`.
pub(crate) fn parse_bool_option(key: &str, raw: &str) -> Result<bool, ConvertError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConvertError::NotSupported(format!(
            "Invalid boolean '{other}' for option '{key}'"
        ))),
    }
}

pub(crate) fn parse_usize_option(key: &str, raw: &str) -> Result<usize, ConvertError> {
    raw.trim().parse().map_err(|_| {
        ConvertError::NotSupported(format!("Invalid number '{raw}' for option '{key}'"))
    })
}

pub(crate) fn unknown_option(format: &str, key: &str) -> ConvertError {
    ConvertError::NotSupported(format!("Format '{format}' has no option '{key}'"))
}
