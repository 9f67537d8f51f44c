//! Hit-testing against stitches, fill lines, and control points.
//!
//! Thresholds are screen pixels converted to world units through the camera,
//! so picking feels the same at every zoom level. Stitches are tested from
//! the top of the paint order down; the first match wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Camera;
use crate::consts::{CURVE_HIT_CHORDS, HANDLE_THRESHOLD_PX, HIT_THRESHOLD_PX};
use crate::doc::{Document, FillShape, Shape, Stitch, StitchId, box_bounds};
use crate::fill::generate_cross_hatch;
use crate::geom::{Point, Segment, box_edges, dist_to_segment, point_in_triangle, sample_quad_bezier};

/// A draggable control point on a stitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// First defining point (line/box/curve start, circle center).
    Start,
    /// Second defining point (line/box/curve end, fill-circle edge).
    End,
    /// Quadratic control point of a curve.
    Control,
    /// Vertex `i` of a path.
    PathPoint(usize),
    /// Vertex `i` of a filled triangle.
    TrianglePoint(usize),
}

/// Result of a stitch hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// The stitch body or outline.
    Stitch(StitchId),
    /// One generated fill line of a filled shape.
    FillLine { id: StitchId, line: Segment },
}

impl Hit {
    #[must_use]
    pub fn stitch_id(&self) -> StitchId {
        match self {
            Self::Stitch(id) | Self::FillLine { id, .. } => *id,
        }
    }
}

/// Every control point of a stitch, in the order they are hit-tested.
#[must_use]
pub fn control_points(stitch: &Stitch) -> Vec<(Handle, Point)> {
    match &stitch.shape {
        Shape::Line { a, b } | Shape::Box { a, b } => vec![(Handle::Start, *a), (Handle::End, *b)],
        Shape::Circle { center, .. } => vec![(Handle::Start, *center)],
        Shape::Curve { a, control, b } => vec![(Handle::Start, *a), (Handle::End, *b), (Handle::Control, *control)],
        Shape::Path { points } => points.iter().enumerate().map(|(i, p)| (Handle::PathPoint(i), *p)).collect(),
        Shape::Filled { fill, .. } => match fill {
            FillShape::Circle { center, edge, .. } => vec![(Handle::Start, *center), (Handle::End, *edge)],
            FillShape::Box { a, b } => vec![(Handle::Start, *a), (Handle::End, *b)],
            FillShape::Triangle { points } => {
                points.iter().enumerate().map(|(i, p)| (Handle::TrianglePoint(i), *p)).collect()
            }
        },
    }
}

/// Find the first control point of `stitch` within the handle threshold.
#[must_use]
pub fn find_control_point_at(stitch: &Stitch, world_pt: Point, camera: &Camera) -> Option<Handle> {
    let threshold = camera.screen_dist_to_world(HANDLE_THRESHOLD_PX);
    control_points(stitch)
        .into_iter()
        .find(|(_, p)| p.distance(world_pt) < threshold)
        .map(|(handle, _)| handle)
}

/// Find the topmost stitch whose stroke passes near `world_pt`.
///
/// Filled shapes test their individual fill lines before their outline, so a
/// click on a hatch line selects that line rather than the whole shape.
#[must_use]
pub fn find_stitch_at(world_pt: Point, doc: &Document, camera: &Camera) -> Option<Hit> {
    let threshold = camera.screen_dist_to_world(HIT_THRESHOLD_PX);

    for stitch in doc.iter().rev() {
        if let Shape::Filled { fill, spacing } = &stitch.shape {
            let fill_line = generate_cross_hatch(fill, *spacing)
                .into_iter()
                .find(|line| line.distance_to(world_pt) < threshold);
            if let Some(line) = fill_line {
                return Some(Hit::FillLine { id: stitch.id, line });
            }
        }
        if outline_near(&stitch.shape, world_pt, threshold) {
            return Some(Hit::Stitch(stitch.id));
        }
    }
    None
}

/// Find the topmost filled shape whose interior contains `world_pt`.
#[must_use]
pub fn find_containing_shape(world_pt: Point, doc: &Document) -> Option<StitchId> {
    doc.iter()
        .rev()
        .find(|stitch| match &stitch.shape {
            Shape::Filled { fill, .. } => fill_contains(fill, world_pt),
            _ => false,
        })
        .map(|stitch| stitch.id)
}

/// Whether a filled shape's interior (boundary included) contains `p`.
#[must_use]
pub fn fill_contains(fill: &FillShape, p: Point) -> bool {
    match fill {
        FillShape::Circle { center, radius, .. } => center.distance(p) <= *radius,
        FillShape::Box { a, b } => {
            let (min, max) = box_bounds(*a, *b);
            p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
        }
        FillShape::Triangle { points } => point_in_triangle(p, points),
    }
}

fn outline_near(shape: &Shape, p: Point, threshold: f64) -> bool {
    match shape {
        Shape::Line { a, b } => dist_to_segment(p, *a, *b) < threshold,
        Shape::Circle { center, radius, .. } => ring_near(*center, *radius, p, threshold),
        Shape::Box { a, b } => box_edges(*a, *b).iter().any(|e| e.distance_to(p) < threshold),
        Shape::Curve { a, control, b } => sample_quad_bezier(*a, *control, *b, CURVE_HIT_CHORDS)
            .windows(2)
            .any(|w| dist_to_segment(p, w[0], w[1]) < threshold),
        Shape::Path { points } => points.windows(2).any(|w| dist_to_segment(p, w[0], w[1]) < threshold),
        Shape::Filled { fill, .. } => match fill {
            FillShape::Circle { center, radius, .. } => ring_near(*center, *radius, p, threshold),
            FillShape::Box { a, b } => box_edges(*a, *b).iter().any(|e| e.distance_to(p) < threshold),
            FillShape::Triangle { points } => {
                (0..3).any(|i| dist_to_segment(p, points[i], points[(i + 1) % 3]) < threshold)
            }
        },
    }
}

fn ring_near(center: Point, radius: f64, p: Point, threshold: f64) -> bool {
    (center.distance(p) - radius).abs() < threshold
}
