//! Cross-hatch fill lines for filled shapes.
//!
//! Lines are laid out symmetrically around the shape's center: one vertical
//! and one horizontal chord through the center, then further chords stepping
//! outward by twice the fill spacing until they leave the bounding box. Each
//! chord is clipped to the shape. The result is plain geometry; dashing it
//! with [`crate::dash::dash_fill_line`] centers a stitch on every chord so
//! perpendicular rows cross at stitches rather than gaps.

#[cfg(test)]
#[path = "fill_test.rs"]
mod fill_test;

use crate::consts::{DEDUP_TOLERANCE, FILL_SPACING_MULTIPLIER};
use crate::doc::{FillShape, box_bounds};
use crate::geom::{Point, Segment, line_line_intersection, point_in_triangle, triangle_area};

/// Generate the clipped chords for a filled shape.
///
/// A non-positive or non-finite spacing yields only the two center chords.
#[must_use]
pub fn generate_cross_hatch(shape: &FillShape, spacing: f64) -> Vec<Segment> {
    match shape {
        FillShape::Box { a, b } => box_fill(*a, *b, spacing),
        FillShape::Circle { center, radius, .. } => circle_fill(*center, *radius, spacing),
        FillShape::Triangle { points } => triangle_fill(points, spacing),
    }
}

fn box_fill(a: Point, b: Point, spacing: f64) -> Vec<Segment> {
    let (min, max) = box_bounds(a, b);
    let center = min.midpoint(max);
    sweep(center, min, max, spacing, Some)
}

fn circle_fill(center: Point, radius: f64, spacing: f64) -> Vec<Segment> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Vec::new();
    }
    let min = Point::new(center.x - radius, center.y - radius);
    let max = Point::new(center.x + radius, center.y + radius);
    sweep(center, min, max, spacing, |chord| clip_line_to_circle(chord, center, radius))
}

fn triangle_fill(points: &[Point; 3], spacing: f64) -> Vec<Segment> {
    if triangle_area(points) == 0.0 {
        return Vec::new();
    }
    let shape = FillShape::Triangle { points: *points };
    let (min, max) = shape.bounds();
    sweep(shape.center(), min, max, spacing, |chord| clip_line_to_triangle(chord, points))
}

/// Emit vertical chords (center, left, right) then horizontal chords
/// (center, above, below), each passed through `clip`.
fn sweep(center: Point, min: Point, max: Point, spacing: f64, clip: impl Fn(Segment) -> Option<Segment>) -> Vec<Segment> {
    let step = spacing * FILL_SPACING_MULTIPLIER;
    let mut out = Vec::new();

    for x in offsets(center.x, min.x, max.x, step) {
        out.extend(clip(Segment::new(Point::new(x, min.y), Point::new(x, max.y))));
    }
    for y in offsets(center.y, min.y, max.y, step) {
        out.extend(clip(Segment::new(Point::new(min.x, y), Point::new(max.x, y))));
    }
    out
}

/// Center first, then `center - k·step` down to `lo`, then `center + k·step` up to `hi`.
fn offsets(center: f64, lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let mut out = vec![center];
    if !(step > 0.0 && step.is_finite()) {
        return out;
    }
    let mut v = center - step;
    while v >= lo {
        out.push(v);
        v -= step;
    }
    v = center + step;
    while v <= hi {
        out.push(v);
        v += step;
    }
    out
}

/// Clip a chord to a circle using the line/circle quadratic.
///
/// Both roots are clamped to the chord's `[0, 1]` parameter range. Misses
/// (negative discriminant or an empty clamped range) return `None`.
#[must_use]
pub fn clip_line_to_circle(chord: Segment, center: Point, radius: f64) -> Option<Segment> {
    let d = chord.b - chord.a;
    let f = chord.a - center;

    let a = d.x * d.x + d.y * d.y;
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * (f.x * d.x + f.y * d.y);
    let c = f.x * f.x + f.y * f.y - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = ((-b - sqrt_disc) / (2.0 * a)).clamp(0.0, 1.0);
    let t2 = ((-b + sqrt_disc) / (2.0 * a)).clamp(0.0, 1.0);
    if t1 > t2 {
        return None;
    }

    Some(Segment::new(chord.a.lerp(chord.b, t1), chord.a.lerp(chord.b, t2)))
}

/// Clip a chord to a triangle.
///
/// Candidate points are the chord's crossings with each edge plus whichever
/// chord endpoints lie inside. After merging near-duplicates the first two
/// survivors form the clipped segment.
#[must_use]
pub fn clip_line_to_triangle(chord: Segment, tri: &[Point; 3]) -> Option<Segment> {
    let mut candidates: Vec<Point> = (0..3)
        .filter_map(|i| line_line_intersection(chord.a, chord.b, tri[i], tri[(i + 1) % 3]))
        .collect();

    if point_in_triangle(chord.a, tri) {
        candidates.push(chord.a);
    }
    if point_in_triangle(chord.b, tri) {
        candidates.push(chord.b);
    }

    let unique = dedup_points(&candidates, DEDUP_TOLERANCE);
    match unique.as_slice() {
        [first, second, ..] => Some(Segment::new(*first, *second)),
        _ => None,
    }
}

/// Drop points within `tolerance` of an earlier kept point, preserving order.
#[must_use]
pub fn dedup_points(points: &[Point], tolerance: f64) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if !unique.iter().any(|u| u.distance(p) < tolerance) {
            unique.push(p);
        }
    }
    unique
}
