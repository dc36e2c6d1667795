//! The geometry capabilities extraction needs from a rendering host.
//!
//! A browser binding, a headless engine, or a test double implements
//! [`LayoutHost`]; the extraction algorithm only ever talks to this trait.
//! Every query is read-only and reflects the host's current committed layout,
//! so callers must extract only after the host has laid the content out.
//!
//! All rectangles are in viewport coordinates. All text offsets are UTF-16
//! code units, matching DOM `Range` and caret offsets.

use core_types::{Point, Rect, Size};
use std::borrow::Cow;
use std::fmt;

/// Selector for elements that wrap exactly one styled text node.
pub const TEXT_SPAN_SELECTOR: &str = "span[data-text]";

/// Which point-to-caret primitives the host provides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretSupport {
    /// `caretPositionFromPoint`-style query.
    pub position_from_point: bool,
    /// `caretRangeFromPoint`-style query.
    pub range_from_point: bool,
}

impl CaretSupport {
    pub const NONE: CaretSupport = CaretSupport {
        position_from_point: false,
        range_from_point: false,
    };
    pub const POSITION: CaretSupport = CaretSupport {
        position_from_point: true,
        range_from_point: false,
    };
    pub const RANGE: CaretSupport = CaretSupport {
        position_from_point: false,
        range_from_point: true,
    };
    pub const BOTH: CaretSupport = CaretSupport {
        position_from_point: true,
        range_from_point: true,
    };

    pub fn is_supported(self) -> bool {
        self.position_from_point || self.range_from_point
    }
}

/// Result of a caret-position query: a node and an offset within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretPosition<N> {
    pub offset_node: N,
    pub offset: usize,
}

/// Result of a caret-range query. For a point query the range is collapsed,
/// but only the start boundary is meaningful to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretRange<N> {
    pub start_container: N,
    pub start_offset: usize,
    pub end_container: N,
    pub end_offset: usize,
}

impl<N: Copy> CaretRange<N> {
    pub fn collapsed(container: N, offset: usize) -> Self {
        Self {
            start_container: container,
            start_offset: offset,
            end_container: container,
            end_offset: offset,
        }
    }
}

pub trait LayoutHost {
    /// Handle for a node in the host's tree. Node identity is what the caret
    /// cross-check compares, so equal handles must mean the same node.
    type Node: Copy + Eq + fmt::Debug;

    /// `getBoundingClientRect()` of an element.
    fn bounding_client_rect(&self, element: Self::Node) -> Rect;

    /// `offsetWidth`/`offsetHeight` of an element.
    fn offset_size(&self, element: Self::Node) -> Size;

    /// Descendants of `container` matching [`TEXT_SPAN_SELECTOR`], in
    /// document order.
    fn text_spans(&self, container: Self::Node) -> Vec<Self::Node>;

    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// `textContent` of a node, or `None` when the host has none for it.
    fn text_content(&self, node: Self::Node) -> Option<Cow<'_, str>>;

    /// Resolved `font` shorthand from the element's computed style. An empty
    /// string is treated the same as `None`.
    fn computed_font(&self, element: Self::Node) -> Option<String>;

    /// `getClientRects()` of an element: one box per line fragment.
    fn client_rects(&self, element: Self::Node) -> Vec<Rect>;

    /// `getClientRects()` of the text range `[start, end)` within `node`.
    fn range_client_rects(&self, node: Self::Node, start: usize, end: usize) -> Vec<Rect>;

    /// `getBoundingClientRect()` of the text range `[start, end)`.
    fn range_bounding_rect(&self, node: Self::Node, start: usize, end: usize) -> Rect {
        self.range_client_rects(node, start, end)
            .into_iter()
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or(Rect::ZERO)
    }

    fn caret_support(&self) -> CaretSupport {
        CaretSupport::NONE
    }

    /// Only consulted when [`CaretSupport::position_from_point`] is set.
    fn caret_position_from_point(&self, _point: Point) -> Option<CaretPosition<Self::Node>> {
        None
    }

    /// Only consulted when [`CaretSupport::range_from_point`] is set.
    fn caret_range_from_point(&self, _point: Point) -> Option<CaretRange<Self::Node>> {
        None
    }
}
