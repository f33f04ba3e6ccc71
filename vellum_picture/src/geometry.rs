// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain value types for points, sizes, and rectangles in `f32` coordinates.

/// A point in `f32` coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to kurbo's point type.
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair in `f32` coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to kurbo's size type.
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Size {
        kurbo::Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// An axis-aligned rectangle stored as its four edges.
///
/// Width, height, and size are derived from the edges and never stored.
/// Edges are not normalized: a rectangle with `right < left` or
/// `bottom < top` is representable and is passed through unchanged.
///
/// An all-zero rectangle reports [`is_empty`](Self::is_empty). APIs where
/// "no rectangle" must be distinguished from a zero-sized rectangle at the
/// origin use `Option<Rect>` instead.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// The all-zero rectangle.
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a rectangle from its edges.
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Create a rectangle spanning two points, in the order given.
    #[inline]
    pub const fn from_points(p0: Point, p1: Point) -> Self {
        Self::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Horizontal extent, `right - left`. Negative for inverted rectangles.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent, `bottom - top`. Negative for inverted rectangles.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Width and height as a [`Size`].
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Returns `true` if all four edges are zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    /// Returns `true` if `point` lies inside this rectangle.
    ///
    /// Left and top edges are inclusive, right and bottom edges exclusive.
    /// Inverted rectangles contain no points.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Returns `true` if the two rectangles overlap with a non-zero area.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Smallest rectangle containing both rectangles.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Union of two optional rectangles, where `None` means "no rectangle".
    #[inline]
    pub fn union_opt(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Convert to kurbo's rectangle type.
    #[inline]
    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// Running min/max accumulator for bounds computations.
///
/// Starts out with no bounds; each added point grows the box.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BoundsBuilder {
    bounds: Option<Rect>,
}

impl BoundsBuilder {
    pub(crate) fn add(&mut self, x: f32, y: f32) {
        self.bounds = Some(match self.bounds {
            None => Rect::new(x, y, x, y),
            Some(b) => Rect::new(b.left.min(x), b.top.min(y), b.right.max(x), b.bottom.max(y)),
        });
    }

    pub(crate) fn add_point(&mut self, point: Point) {
        self.add(point.x, point.y);
    }

    pub(crate) fn add_rect(&mut self, rect: &Rect) {
        self.add(rect.left, rect.top);
        self.add(rect.right, rect.bottom);
    }

    pub(crate) fn finish(self) -> Option<Rect> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_extents() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right, 40.0);
        assert_eq!(r.bottom, 60.0);
        assert_eq!(r.size(), Size::new(30.0, 40.0));
        assert_eq!(r.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn empty_means_all_zero() {
        assert!(Rect::EMPTY.is_empty());
        assert!(Rect::default().is_empty());
        // Zero-sized but not at the origin.
        assert!(!Rect::new(5.0, 5.0, 5.0, 5.0).is_empty());
    }

    #[test]
    fn inverted_rects_are_tolerated() {
        let r = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(r.width(), -10.0);
        assert!(!r.contains(Point::new(5.0, 5.0)));
        let u = r.union(&Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(u, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn union_of_optionals() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(Rect::union_opt(None, None), None);
        assert_eq!(Rect::union_opt(Some(a), None), Some(a));
        assert_eq!(
            Rect::union_opt(Some(a), Some(Rect::new(2.0, 2.0, 3.0, 3.0))),
            Some(Rect::new(0.0, 0.0, 3.0, 3.0))
        );
    }

    #[test]
    fn bounds_builder_grows() {
        let mut b = BoundsBuilder::default();
        assert_eq!(b.finish(), None);
        b.add(3.0, -1.0);
        b.add(-2.0, 4.0);
        assert_eq!(b.finish(), Some(Rect::new(-2.0, -1.0, 3.0, 4.0)));
    }
}
