//! Running-stitch dash generation.
//!
//! Each function turns one primitive into the visible "on" segments of its
//! dash pattern. Gaps are never emitted. Dash and gap lengths come from a
//! resolved [`DashSpec`]; a spec that cannot be walked (zero or non-finite
//! dash) produces no segments instead of looping forever.

#[cfg(test)]
#[path = "dash_test.rs"]
mod dash_test;

use std::f64::consts::TAU;

use crate::consts::{CURVE_DASH_SAMPLES, PATH_MICRO_STEP};
use crate::doc::{Shape, Stitch};
use crate::fill;
use crate::geom::{Point, Segment, box_edges, sample_quad_bezier};
use crate::style::DashSpec;

/// Dash a straight line from `a`, dash `i` covering `[i·period, i·period + dash]`
/// clamped to the line length.
#[must_use]
pub fn dash_line(a: Point, b: Point, spec: DashSpec) -> Vec<Segment> {
    let line = Segment::new(a, b);
    let distance = line.length();
    if distance == 0.0 || !spec.is_drawable() {
        return Vec::new();
    }

    let period = spec.period();
    let mut out = Vec::new();
    let mut i = 0.0_f64;
    loop {
        let start = i * period;
        if start >= distance {
            break;
        }
        let end = (start + spec.dash).min(distance);
        out.push(Segment::new(line.point_at_distance(start), line.point_at_distance(end)));
        i += 1.0;
    }
    out
}

/// Dash a cross-hatch chord so that a full stitch sits on its midpoint.
///
/// The center stitch is always emitted whole. Further stitches step outward
/// by one period in both directions while they fit inside the chord.
#[must_use]
pub fn dash_fill_line(a: Point, b: Point, spec: DashSpec) -> Vec<Segment> {
    let line = Segment::new(a, b);
    let distance = line.length();
    if distance == 0.0 || !spec.is_drawable() {
        return Vec::new();
    }

    let period = spec.period();
    let mid = distance / 2.0;
    let center_start = mid - spec.dash / 2.0;
    let center_end = mid + spec.dash / 2.0;
    let dash_at = |from: f64| Segment::new(line.point_at_distance(from), line.point_at_distance(from + spec.dash));

    let mut out = vec![Segment::new(line.point_at_distance(center_start), line.point_at_distance(center_end))];

    let mut pos = center_start - period;
    while pos >= 0.0 {
        out.push(dash_at(pos));
        pos -= period;
    }

    pos = center_end + spec.gap;
    while pos + spec.dash <= distance {
        out.push(dash_at(pos));
        pos += period;
    }
    out
}

/// Dash a circle as straight chords, starting at angle 0.
///
/// Arc lengths convert to angles via `length / radius`. The last dash may
/// overlap the first when the circumference is not a whole number of periods.
#[must_use]
pub fn dash_circle(center: Point, radius: f64, spec: DashSpec) -> Vec<Segment> {
    if !(radius > 0.0 && radius.is_finite()) || !spec.is_drawable() {
        return Vec::new();
    }

    let period = spec.period();
    let count = TAU * radius / period;
    let at = |angle: f64| Point::new(center.x + angle.cos() * radius, center.y + angle.sin() * radius);

    let mut out = Vec::new();
    let mut i = 0.0_f64;
    while i < count {
        let start = i * period / radius;
        let end = start + spec.dash / radius;
        out.push(Segment::new(at(start), at(end)));
        i += 1.0;
    }
    out
}

/// Dash the four sides of an axis-aligned box: top, right, bottom, left.
#[must_use]
pub fn dash_box(a: Point, b: Point, spec: DashSpec) -> Vec<Segment> {
    box_edges(a, b).iter().flat_map(|side| dash_line(side.a, side.b, spec)).collect()
}

/// Dash a quadratic curve over its fixed sample polyline.
///
/// A sample chord is drawn when the cumulative arc length at its far end,
/// taken modulo the period, falls inside the dash. Dash boundaries are
/// therefore only as fine as the sampling.
#[must_use]
pub fn dash_curve(a: Point, control: Point, b: Point, spec: DashSpec) -> Vec<Segment> {
    if !spec.is_drawable() {
        return Vec::new();
    }
    let period = spec.period();
    let samples = sample_quad_bezier(a, control, b, CURVE_DASH_SAMPLES);

    let mut walked = 0.0;
    let mut out = Vec::new();
    for pair in samples.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        let len = p.distance(q);
        walked += len;
        if len > 0.0 && walked % period < spec.dash {
            out.push(Segment::new(p, q));
        }
    }
    out
}

/// Dash an open polyline using micro-steps of about two units per segment.
///
/// The dash phase carries across vertices; it is not reset per segment.
#[must_use]
pub fn dash_path(points: &[Point], spec: DashSpec) -> Vec<Segment> {
    if !spec.is_drawable() {
        return Vec::new();
    }
    let period = spec.period();

    let mut walked = 0.0;
    let mut out = Vec::new();
    for pair in points.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        let seg_len = p.distance(q);
        let steps = micro_steps(seg_len);
        for j in 0..steps {
            let m1 = p.lerp(q, j as f64 / steps as f64);
            let m2 = p.lerp(q, (j + 1) as f64 / steps as f64);
            if walked % period < spec.dash {
                out.push(Segment::new(m1, m2));
            }
            walked += m1.distance(m2);
        }
    }
    out
}

/// Number of micro-steps for a path segment: `ceil(len / 2)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn micro_steps(seg_len: f64) -> usize {
    if !seg_len.is_finite() || seg_len <= 0.0 {
        return 0;
    }
    (seg_len / PATH_MICRO_STEP).ceil() as usize
}

/// All visible segments for a stitch, in the order they should be drawn.
#[must_use]
pub fn stitch_segments(stitch: &Stitch, spec: DashSpec) -> Vec<Segment> {
    shape_segments(&stitch.shape, spec)
}

/// Visible segments for a bare shape (used for previews before a stitch exists).
#[must_use]
pub fn shape_segments(shape: &Shape, spec: DashSpec) -> Vec<Segment> {
    match shape {
        Shape::Line { a, b } => dash_line(*a, *b, spec),
        Shape::Circle { center, radius, .. } => dash_circle(*center, *radius, spec),
        Shape::Box { a, b } => dash_box(*a, *b, spec),
        Shape::Curve { a, control, b } => dash_curve(*a, *control, *b, spec),
        Shape::Path { points } => dash_path(points, spec),
        Shape::Filled { fill, spacing } => fill::generate_cross_hatch(fill, *spacing)
            .into_iter()
            .flat_map(|line| dash_fill_line(line.a, line.b, spec))
            .collect(),
    }
}
