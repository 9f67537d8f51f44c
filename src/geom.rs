//! Vector math shared by the dash, fill, simplify, and hit modules.
//!
//! Everything here is pure and infallible. Degenerate input (zero-length
//! segments, parallel lines, zero-area triangles) yields `None` or a
//! well-defined fallback rather than `NaN`.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Mul, Sub};

use crate::consts::PARALLEL_EPSILON;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation toward `other`; `t = 0` is `self`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Shortest distance from `p` to any point on the segment.
    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        dist_to_segment(p, self.a, self.b)
    }

    /// Point at arc-length `d` from `a`, measured along the segment direction.
    ///
    /// `d` is not clamped; callers walking past the end get an extrapolated point.
    #[must_use]
    pub fn point_at_distance(&self, d: f64) -> Point {
        let len = self.length();
        if len == 0.0 {
            return self.a;
        }
        self.a.lerp(self.b, d / len)
    }
}

/// The four sides of an axis-aligned box in top, right, bottom, left order.
#[must_use]
pub fn box_edges(a: Point, b: Point) -> [Segment; 4] {
    let top_right = Point::new(b.x, a.y);
    let bottom_left = Point::new(a.x, b.y);
    [
        Segment::new(a, top_right),
        Segment::new(top_right, b),
        Segment::new(b, bottom_left),
        Segment::new(bottom_left, a),
    ]
}

/// Distance from `p` to the segment `a`–`b`, projecting onto the clamped span.
///
/// A zero-length segment reduces to point distance.
#[must_use]
pub fn dist_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Distance from `p` to the infinite line through `start` and `end`.
///
/// Falls back to the distance to `start` when the chord is degenerate.
#[must_use]
pub fn perpendicular_distance(p: Point, start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let denominator = dx.hypot(dy);
    if denominator == 0.0 {
        return p.distance(start);
    }
    let numerator = (dy * p.x - dx * p.y + end.x * start.y - end.y * start.x).abs();
    numerator / denominator
}

/// Intersection of segments `p1`–`p2` and `p3`–`p4`, if they cross within both spans.
///
/// Nearly parallel pairs report no intersection.
#[must_use]
pub fn line_line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1.lerp(p2, t))
    } else {
        None
    }
}

/// Signed area of a triangle (positive for counter-clockwise in y-up space).
#[must_use]
pub fn triangle_area(tri: &[Point; 3]) -> f64 {
    let [p0, p1, p2] = *tri;
    0.5 * (-p1.y * p2.x + p0.y * (-p1.x + p2.x) + p0.x * (p1.y - p2.y) + p1.x * p2.y)
}

/// Barycentric containment test; points on an edge count as inside.
///
/// A zero-area triangle contains nothing.
#[must_use]
pub fn point_in_triangle(p: Point, tri: &[Point; 3]) -> bool {
    let area = triangle_area(tri);
    if area == 0.0 {
        return false;
    }
    let [p0, p1, p2] = *tri;
    let inv = 1.0 / (2.0 * area);
    let s = inv * (p0.y * p2.x - p0.x * p2.y + (p2.y - p0.y) * p.x + (p0.x - p2.x) * p.y);
    let t = inv * (p0.x * p1.y - p0.y * p1.x + (p0.y - p1.y) * p.x + (p1.x - p0.x) * p.y);
    s >= 0.0 && t >= 0.0 && (1.0 - s - t) >= 0.0
}

/// Evaluate the quadratic Bezier `p0`, `control`, `p2` at parameter `t`.
#[must_use]
pub fn quad_bezier(p0: Point, control: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * control.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * control.y + t * t * p2.y,
    )
}

/// `steps + 1` points at uniform parameter spacing, both ends included.
#[must_use]
pub fn sample_quad_bezier(p0: Point, control: Point, p2: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| quad_bezier(p0, control, p2, i as f64 / steps as f64))
        .collect()
}
