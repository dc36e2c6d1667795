/// A point in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// An axis-aligned box in CSS px, stored as edges (the way `DOMRect` reports
/// `left/top/right/bottom`).
///
/// Edges are not normalized: a zero-width box (`left == right`) is a valid
/// result for collapsed ranges and hanging whitespace.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Shift every edge by `(-dx, -dy)`; used to re-frame viewport boxes into
    /// a container's coordinate space.
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect {
            left: self.left - origin.x,
            top: self.top - origin.y,
            right: self.right - origin.x,
            bottom: self.bottom - origin.y,
        }
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Inclusive on all edges, matching hit-testing against painted fragments.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_subtracts_origin_from_every_edge() {
        let r = Rect::from_xywh(110.0, 220.0, 30.0, 20.0);
        let framed = r.relative_to(Point::new(100.0, 200.0));
        assert_eq!(framed, Rect::new(10.0, 20.0, 40.0, 40.0));
        assert_eq!(framed.width(), r.width());
        assert_eq!(framed.height(), r.height());
    }

    #[test]
    fn union_covers_both_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -2.0, 30.0, 4.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -2.0, 30.0, 10.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.5, 0.0)));
    }
}
