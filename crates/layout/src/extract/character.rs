use super::SpanContext;
use crate::host::LayoutHost;
use crate::options::SubRectPolicy;
use crate::types::TextRun;
use core_types::Rect;
use tools::utf16::code_points;
use tools::whitespace::is_ecma_whitespace;

/// Measure each code point of the span and coalesce same-row neighbours.
///
/// Whitespace is never emitted and closes the open run, so words stay
/// separate and a wrap boundary always starts a fresh run.
pub(super) fn extract_span<H: LayoutHost + ?Sized>(
    host: &H,
    ctx: &SpanContext<'_, H::Node>,
    policy: SubRectPolicy,
    lines: &mut Vec<TextRun>,
) {
    let mut open: Option<TextRun> = None;

    for point in code_points(ctx.text) {
        if is_ecma_whitespace(point.ch) {
            lines.extend(open.take());
            continue;
        }

        let rect = character_rect(host, ctx.text_node, point.start, point.end, policy)
            .relative_to(ctx.origin);

        match open.as_mut() {
            Some(run) if run.shares_row(&rect) => run.extend_to(rect.right, point.text),
            _ => {
                let fresh = TextRun::from_rect(point.text, rect, ctx.font);
                lines.extend(open.replace(fresh));
            }
        }
    }

    lines.extend(open);
}

fn character_rect<H: LayoutHost + ?Sized>(
    host: &H,
    node: H::Node,
    start: usize,
    end: usize,
    policy: SubRectPolicy,
) -> Rect {
    match policy {
        SubRectPolicy::FirstNonEmpty => host
            .range_client_rects(node, start, end)
            .into_iter()
            .find(|r| r.width() > 0.0)
            .unwrap_or_else(|| host.range_bounding_rect(node, start, end)),
        SubRectPolicy::BoundingRect => host.range_bounding_rect(node, start, end),
    }
}
