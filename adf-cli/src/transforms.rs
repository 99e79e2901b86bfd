//! Inspect transforms
//!
//! Each transform views the parsed document from a different angle:
//!
//! - `doc-json`: the parsed tree re-serialized as pretty JSON, which shows what survived
//!   parsing (unknown fields are dropped)
//! - `doc-treeviz`: tree visualization with icons, the default
//! - `doc-trace`: the engine's visit order with sibling indices and list context
//!
//! ## Extra Parameters
//!
//! `doc-treeviz` accepts `--extra-show-attrs` to append node attributes to each label. The
//! other transforms take no parameters.

use adf_babel::formats::{TraceFormat, TreevizFormat, TreevizOptions};
use adf_babel::{parse_document, Format};
use std::collections::HashMap;

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["doc-json", "doc-treeviz", "doc-trace"];

/// Transform used when none is named.
pub const DEFAULT_TRANSFORM: &str = "doc-treeviz";

/// Execute a named transform on ADF JSON source.
///
/// `treeviz` carries the configured visualization options; `extra_params` are layered on top
/// and rejected by transforms that take none.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    treeviz: TreevizOptions,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse_document(source).map_err(|e| format!("Parse error: {e}"))?;

    match transform_name {
        "doc-json" => {
            reject_params(transform_name, extra_params)?;
            let mut json = serde_json::to_string_pretty(&doc)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            json.push('\n');
            Ok(json)
        }
        "doc-treeviz" => TreevizFormat::new(treeviz)
            .serialize_with_options(&doc, extra_params)
            .map_err(|e| format!("Transform failed: {e}")),
        "doc-trace" => TraceFormat
            .serialize_with_options(&doc, extra_params)
            .map_err(|e| format!("Transform failed: {e}")),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn reject_params(transform: &str, params: &HashMap<String, String>) -> Result<(), String> {
    match params.keys().next() {
        Some(key) => Err(format!("Transform '{transform}' does not accept --extra-{key}")),
        None => Ok(()),
    }
}
