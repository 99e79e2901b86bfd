//! Stock formatters
//!
//! Each format is a handler table handed to the engine; none of them walks the tree itself.

pub mod html;
pub mod icons;
pub mod markdown;
pub mod text;
pub mod trace;
pub mod treeviz;

pub use html::{html_formatter, HtmlFormat, HtmlOptions};
pub use markdown::{markdown_formatter, MarkdownFormat, MarkdownOptions};
pub use text::{text_formatter, TextFormat};
pub use trace::{trace_formatter, TraceFormat, TraceLog};
pub use treeviz::{treeviz_formatter, TreevizFormat, TreevizOptions, VizNode};
