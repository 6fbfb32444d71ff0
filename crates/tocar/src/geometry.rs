//! Rectangle and point primitives with overlap tests.
//!
//! All coordinates are floating-point device pixels, matching the bounds
//! carried on a component snapshot.

use serde::{Deserialize, Serialize};

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned bounding box.
///
/// Derived as `(left, top, left + width, top + height)` from a snapshot
/// node. `right < left` or `bottom < top` indicates a collapsed node and
/// is treated as invisible, not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl Rect {
    /// Create a rect from its four edges
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rect from an origin and a size
    #[must_use]
    pub const fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Width of the rect (may be negative for a collapsed node)
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rect (may be negative for a collapsed node)
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point of the rect
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Whether a point lies inside this rect (edges inclusive)
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Whether this rect has any overlap with another.
    ///
    /// Degenerate rects (zero or negative extent) never overlap anything.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Whether this rect touches another (edges inclusive).
    ///
    /// Unlike [`Rect::overlaps`], a degenerate rect lying inside `other`
    /// still touches it. Used by the tree-search visibility filter, which
    /// must keep zero-size nodes that sit within their parent's region.
    #[must_use]
    pub fn touches(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Intersection of two rects clamped to their shared region, without an
    /// overlap requirement. May produce a degenerate rect.
    #[must_use]
    pub fn clamped_to(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// Intersection of two rects, or `None` when they do not overlap
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        ))
    }

    /// Whether the rect is effectively invisible (`width < 1` or `height < 1`)
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() < 1.0 || self.height() < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod point_tests {
        use super::*;

        #[test]
        fn test_point_new() {
            let p = Point::new(100.0, 200.0);
            assert!((p.x - 100.0).abs() < f32::EPSILON);
            assert!((p.y - 200.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_distance() {
            let a = Point::new(0.0, 0.0);
            let b = Point::new(3.0, 4.0);
            assert!((a.distance_to(&b) - 5.0).abs() < f32::EPSILON);
        }
    }

    mod rect_tests {
        use super::*;

        #[test]
        fn test_from_size() {
            let r = Rect::from_size(10.0, 20.0, 100.0, 50.0);
            assert!((r.right - 110.0).abs() < f32::EPSILON);
            assert!((r.bottom - 70.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_center() {
            let r = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let c = r.center();
            assert!((c.x - 50.0).abs() < f32::EPSILON);
            assert!((c.y - 50.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_contains_edges() {
            let r = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            assert!(r.contains(&Point::new(0.0, 0.0)));
            assert!(r.contains(&Point::new(100.0, 100.0)));
            assert!(!r.contains(&Point::new(101.0, 50.0)));
        }

        #[test]
        fn test_overlaps() {
            let a = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let b = Rect::from_size(50.0, 50.0, 100.0, 100.0);
            let c = Rect::from_size(200.0, 200.0, 10.0, 10.0);
            assert!(a.overlaps(&b));
            assert!(!a.overlaps(&c));
        }

        #[test]
        fn test_touching_edges_do_not_overlap() {
            let a = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let b = Rect::from_size(100.0, 0.0, 100.0, 100.0);
            assert!(!a.overlaps(&b));
        }

        #[test]
        fn test_touches_is_inclusive() {
            let a = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let edge = Rect::from_size(100.0, 0.0, 100.0, 100.0);
            let degenerate = Rect::from_size(50.0, 50.0, 0.0, 0.0);
            let outside = Rect::from_size(200.0, 200.0, 10.0, 10.0);
            assert!(a.touches(&edge));
            assert!(degenerate.touches(&a));
            assert!(!outside.touches(&a));
        }

        #[test]
        fn test_clamped_to() {
            let a = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let b = Rect::from_size(50.0, -10.0, 100.0, 50.0);
            let c = b.clamped_to(&a);
            assert!((c.left - 50.0).abs() < f32::EPSILON);
            assert!((c.top - 0.0).abs() < f32::EPSILON);
            assert!((c.right - 100.0).abs() < f32::EPSILON);
            assert!((c.bottom - 40.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_intersect() {
            let a = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            let b = Rect::from_size(50.0, 50.0, 100.0, 100.0);
            let i = a.intersect(&b).unwrap();
            assert!((i.left - 50.0).abs() < f32::EPSILON);
            assert!((i.right - 100.0).abs() < f32::EPSILON);
        }

        #[test]
        fn test_intersect_disjoint() {
            let a = Rect::from_size(0.0, 0.0, 10.0, 10.0);
            let b = Rect::from_size(50.0, 50.0, 10.0, 10.0);
            assert!(a.intersect(&b).is_none());
        }

        #[test]
        fn test_degenerate() {
            assert!(Rect::from_size(0.0, 0.0, 0.5, 100.0).is_degenerate());
            assert!(Rect::from_size(0.0, 0.0, 100.0, 0.0).is_degenerate());
            assert!(!Rect::from_size(0.0, 0.0, 1.0, 1.0).is_degenerate());
        }

        #[test]
        fn test_collapsed_rect_never_overlaps() {
            let collapsed = Rect::new(10.0, 10.0, 5.0, 5.0);
            let big = Rect::from_size(0.0, 0.0, 100.0, 100.0);
            assert!(!collapsed.overlaps(&big));
        }
    }
}
