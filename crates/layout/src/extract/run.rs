use super::SpanContext;
use crate::caret::caret_from_point;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Probe};
use crate::host::LayoutHost;
use crate::options::CARET_PROBE_INSET;
use crate::types::TextRun;
use core_types::Point;
use tools::utf16::slice_utf16;

/// One run per line box of the span, sliced by hit testing both edges.
///
/// A line box is dropped when either probe misses or lands in a different
/// text node: its geometry straddles something the rect alone cannot explain.
pub(super) fn extract_span<H, S>(
    host: &H,
    span: H::Node,
    ctx: &SpanContext<'_, H::Node>,
    sink: &mut S,
    lines: &mut Vec<TextRun>,
) where
    H: LayoutHost + ?Sized,
    S: DiagnosticSink,
{
    for (rect_index, rect) in host.client_rects(span).into_iter().enumerate() {
        let y = rect.top + CARET_PROBE_INSET;
        let start_at = Point::new(rect.left + CARET_PROBE_INSET, y);
        let end_at = Point::new(rect.right + CARET_PROBE_INSET, y);

        let Some(start) = probe(host, ctx, rect_index, Probe::Start, start_at, sink) else {
            continue;
        };
        let Some(end) = probe(host, ctx, rect_index, Probe::End, end_at, sink) else {
            continue;
        };

        let text = slice_utf16(ctx.text, start, end);
        lines.push(TextRun::from_rect(text, rect.relative_to(ctx.origin), ctx.font));
    }
}

/// Offset of the caret under `at`, provided it is inside this span's own
/// text node.
fn probe<H, S>(
    host: &H,
    ctx: &SpanContext<'_, H::Node>,
    rect: usize,
    edge: Probe,
    at: Point,
    sink: &mut S,
) -> Option<usize>
where
    H: LayoutHost + ?Sized,
    S: DiagnosticSink,
{
    let span = ctx.index;
    match caret_from_point(host, at) {
        None => {
            sink.report(Diagnostic::CaretUnresolved { span, rect, probe: edge });
            None
        }
        Some(caret) if caret.node != ctx.text_node => {
            log::debug!(
                target: "layout.extract",
                "{edge} caret for span {span} resolved to {:?}, expected {:?}",
                caret.node,
                ctx.text_node
            );
            sink.report(Diagnostic::CaretMismatch { span, rect, probe: edge });
            None
        }
        Some(caret) => Some(caret.offset),
    }
}
