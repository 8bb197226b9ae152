//! Geometry primitives: [`Point`] and [`Rect`], plus the distance helpers the
//! search uses for edge costs and heuristics.

use std::fmt;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A point in the plane.
///
/// Serialised as a two-element array `[x, y]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        distance(self, other)
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned box with closed bounds `[x_min, x_max] × [y_min, y_max]`.
///
/// Serialised as `[x_min, x_max, y_min, y_max]`, the order level files use.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Rect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Rect {
    /// Create a new box from its bounds, swapping them where needed so that
    /// `x_min ≤ x_max` and `y_min ≤ y_max`.
    ///
    /// NaN bounds are kept as given, so [`is_valid`](Self::is_valid) still
    /// rejects the box.
    #[inline]
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        let (x_min, x_max) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let (y_min, y_max) = if y1 < y0 { (y1, y0) } else { (y0, y1) };
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Whether the bounds are ordered and finite.
    pub fn is_valid(self) -> bool {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        finite && self.x_min <= self.x_max && self.y_min <= self.y_max
    }

    /// Centre of the box.
    #[inline]
    pub fn midpoint(self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Whether `p` lies inside the closed bounds (edges included).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        self.x_min <= p.x && p.x <= self.x_max && self.y_min <= p.y && p.y <= self.y_max
    }

    /// The point of the box closest to `p`.
    ///
    /// Each coordinate is clamped independently, so points inside the box
    /// map to themselves.
    #[inline]
    pub fn clamp(self, p: Point) -> Point {
        Point::new(
            self.x_min.max(p.x.min(self.x_max)),
            self.y_min.max(p.y.min(self.y_max)),
        )
    }

    /// Whether the two boxes share a region of positive area. Boxes that
    /// only touch along an edge or a corner do not overlap.
    pub fn overlaps(self, other: Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }
}

impl From<[f64; 4]> for Rect {
    fn from([x0, x1, y0, y1]: [f64; 4]) -> Self {
        Self::new(x0, x1, y0, y1)
    }
}

impl From<Rect> for [f64; 4] {
    fn from(r: Rect) -> Self {
        [r.x_min, r.x_max, r.y_min, r.y_max]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Centre of a box.
#[inline]
pub fn midpoint(r: Rect) -> Point {
    r.midpoint()
}

/// Cost of stepping between two boxes: the distance between their midpoints.
///
/// The same metric doubles as the A* estimate toward a goal box. Since it
/// obeys the triangle inequality the estimate is consistent.
#[inline]
pub fn edge_cost(a: Rect, b: Rect) -> f64 {
    distance(a.midpoint(), b.midpoint())
}

/// The point of `r` closest to `p`.
#[inline]
pub fn closest_point(p: Point, r: Rect) -> Point {
    r.clamp(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_three_four_five() {
        assert_relative_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_relative_eq!(distance(Point::new(3.0, 4.0), Point::new(0.0, 0.0)), 5.0);
    }

    #[test]
    fn new_canonicalizes_bounds() {
        let r = Rect::new(10.0, 2.0, 8.0, -1.0);
        assert_eq!(r, Rect::new(2.0, 10.0, -1.0, 8.0));
        assert!(r.is_valid());
    }

    #[test]
    fn midpoint_is_centre() {
        let r = Rect::new(0.0, 4.0, 2.0, 10.0);
        assert_eq!(midpoint(r), Point::new(2.0, 6.0));
    }

    #[test]
    fn edge_cost_is_symmetric() {
        let a = Rect::new(0.0, 2.0, 0.0, 2.0);
        let b = Rect::new(2.0, 10.0, 0.0, 2.0);
        assert_relative_eq!(edge_cost(a, b), 5.0);
        assert_relative_eq!(edge_cost(a, b), edge_cost(b, a));
        assert_relative_eq!(edge_cost(a, a), 0.0);
    }

    #[test]
    fn contains_is_closed() {
        let r = Rect::new(0.0, 1.0, 0.0, 1.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(1.0, 1.0)));
        assert!(r.contains(Point::new(0.5, 1.0)));
        assert!(!r.contains(Point::new(1.0001, 0.5)));
        assert!(!r.contains(Point::new(0.5, -0.1)));
    }

    #[test]
    fn clamp_projects_onto_box() {
        let r = Rect::new(0.0, 10.0, 0.0, 5.0);
        // Interior points are fixed.
        assert_eq!(closest_point(Point::new(3.0, 2.0), r), Point::new(3.0, 2.0));
        // Each axis clamps on its own.
        assert_eq!(closest_point(Point::new(-4.0, 2.0), r), Point::new(0.0, 2.0));
        assert_eq!(closest_point(Point::new(12.0, 9.0), r), Point::new(10.0, 5.0));
        assert_eq!(closest_point(Point::new(5.0, -3.0), r), Point::new(5.0, 0.0));
    }

    #[test]
    fn overlap_excludes_shared_edges() {
        let a = Rect::new(0.0, 2.0, 0.0, 2.0);
        let b = Rect::new(2.0, 4.0, 0.0, 2.0);
        let c = Rect::new(1.0, 3.0, 1.0, 3.0);
        assert!(!a.overlaps(b));
        assert!(!a.overlaps(Rect::new(2.0, 3.0, 2.0, 3.0)));
        assert!(a.overlaps(c));
        assert!(c.overlaps(a));
    }

    #[test]
    fn invalid_bounds_detected() {
        let r = Rect {
            x_min: 3.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        };
        assert!(!r.is_valid());
        let nan = Rect {
            x_min: 0.0,
            x_max: f64::NAN,
            y_min: 0.0,
            y_max: 1.0,
        };
        assert!(!nan.is_valid());

        assert!(!Rect::new(f64::NAN, 1.0, 0.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 1.0, 1.0, f64::NAN).is_valid());
        assert!(Rect::new(0.0, 1.0, 1.0, 0.0).is_valid());
    }
}
