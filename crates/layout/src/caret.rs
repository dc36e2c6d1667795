use crate::host::LayoutHost;
use core_types::Point;

/// A resolved text-cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SimpleCaret<N> {
    pub(crate) node: N,
    pub(crate) offset: usize,
}

/// Ask the host which text position sits under `point`.
///
/// Prefers the caret-position primitive and falls back to the start boundary
/// of the caret-range primitive. `None` when the host offers neither or
/// reports no hit; callers treat that as ambiguous geometry, not a failure.
pub(crate) fn caret_from_point<H: LayoutHost + ?Sized>(
    host: &H,
    point: Point,
) -> Option<SimpleCaret<H::Node>> {
    let support = host.caret_support();
    let caret = if support.position_from_point {
        host.caret_position_from_point(point)
            .map(|p| SimpleCaret {
                node: p.offset_node,
                offset: p.offset,
            })
    } else if support.range_from_point {
        host.caret_range_from_point(point).map(|r| SimpleCaret {
            node: r.start_container,
            offset: r.start_offset,
        })
    } else {
        None
    };
    log::trace!(target: "layout.caret", "caret at ({}, {}): {caret:?}", point.x, point.y);
    caret
}
