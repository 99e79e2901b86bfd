//! Trace format: a visit log instead of a value
//!
//! The formatter produces `()`; every handler appends one line to a shared [`TraceLog`] and
//! then descends. The log therefore lists nodes in the order the engine visits them:
//!
//! ```text
//! doc #0 depth=- kind=-
//!   bulletList #0 depth=- kind=-
//!     listItem #0 depth=0 kind=bullet
//!       paragraph #0 depth=0 kind=bullet
//!         text #0 depth=0 kind=bullet marks=strong
//! ```
//!
//! `depth` and `kind` show the list context the node was formatted under, `#n` its sibling
//! index. Indentation follows tree depth, which the log tracks itself.

use crate::adf::{ContextOverride, ConversionContext, ListKind, Node};
use crate::engine::formatter::Formatter;
use crate::engine::Children;
use crate::error::ConvertError;
use crate::format::Format;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct TraceState {
    lines: Vec<String>,
    level: usize,
}

/// Shared, cloneable sink for trace lines.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    state: Arc<Mutex<TraceState>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .clone()
    }

    fn record(&self, line: String) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let indent = "  ".repeat(state.level);
        state.lines.push(format!("{indent}{line}"));
    }

    /// Run `descend` one level deeper.
    fn nested(&self, descend: impl FnOnce()) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .level += 1;
        descend();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.level = state.level.saturating_sub(1);
    }
}

/// Build a formatter that records into `log`.
pub fn trace_formatter(log: TraceLog) -> Formatter<()> {
    let lists = log.clone();
    let items = log.clone();
    Formatter::<()>::new(move |node, children, ctx, idx| visit(&log, node, children, ctx, idx, None))
        .with_node("bulletList", move |node, children, ctx, idx| {
            visit(&lists, node, children, ctx, idx, Some(ListKind::Bullet))
        })
        .with_node("orderedList", move |node, children, ctx, idx| {
            visit(&items, node, children, ctx, idx, Some(ListKind::Ordered))
        })
}

fn visit(
    log: &TraceLog,
    node: &Node,
    children: &Children<'_, ()>,
    ctx: &ConversionContext,
    sibling_index: usize,
    enters: Option<ListKind>,
) {
    log.record(describe(node, ctx, sibling_index));

    let overrides = match enters {
        Some(kind) => ContextOverride::inherit()
            .list_depth(ctx.nested_list_depth())
            .list_kind(kind),
        None => ContextOverride::inherit(),
    };
    log.nested(|| {
        children.process_with(overrides);
    });
}

fn describe(node: &Node, ctx: &ConversionContext, sibling_index: usize) -> String {
    let depth = ctx
        .list_depth
        .map_or_else(|| "-".to_string(), |depth| depth.to_string());
    let kind = ctx
        .list_kind
        .map_or_else(|| "-".to_string(), |kind| kind.to_string());
    let mut line = format!("{} #{sibling_index} depth={depth} kind={kind}", node.node_type);

    if !node.marks.is_empty() {
        let marks: Vec<&str> = node.marks.iter().map(|m| m.mark_type.as_str()).collect();
        line.push_str(&format!(" marks={}", marks.join(",")));
    }
    line
}

/// Format implementation exposing the trace as text
pub struct TraceFormat;

impl Format for TraceFormat {
    fn name(&self) -> &str {
        "trace"
    }

    fn description(&self) -> &str {
        "Pre-order visit log with list context"
    }

    fn file_extensions(&self) -> &[&str] {
        &["trace"]
    }

    fn serialize(&self, doc: &Node) -> Result<String, ConvertError> {
        let log = TraceLog::new();
        crate::engine::run_with_sink(
            doc,
            &trace_formatter(log.clone()),
            &crate::engine::diagnostics::NullSink,
        )?;
        let mut output = log.lines().join("\n");
        output.push('\n');
        Ok(output)
    }
}
