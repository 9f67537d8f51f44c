//! Pen-stroke cleanup: Douglas-Peucker reduction then Chaikin smoothing.

#[cfg(test)]
#[path = "simplify_test.rs"]
mod simplify_test;

use crate::consts::{CHAIKIN_ITERATIONS, SIMPLIFY_TOLERANCE};
use crate::geom::{Point, perpendicular_distance};
use crate::style::snap_to_grid;

/// Reduce a polyline to the points that deviate more than `tolerance` from
/// the chord of their enclosing range. Endpoints are always kept.
#[must_use]
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let (index, max_dist) = points[1..last]
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, perpendicular_distance(*p, points[0], points[last])))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });

    if index > 0 && max_dist > tolerance {
        let mut left = douglas_peucker(&points[..=index], tolerance);
        let right = douglas_peucker(&points[index..], tolerance);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![points[0], points[last]]
    }
}

/// Open-path Chaikin corner cutting.
///
/// Each pass replaces every edge with points at 25% and 75% along it while
/// keeping the first and last points. Fewer than three points are returned
/// unchanged.
#[must_use]
pub fn chaikin(points: &[Point], iterations: usize) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut current = points.to_vec();
    for _ in 0..iterations {
        let mut next = Vec::with_capacity(current.len() * 2);
        next.push(current[0]);
        for pair in current.windows(2) {
            next.push(pair[0].lerp(pair[1], 0.25));
            next.push(pair[0].lerp(pair[1], 0.75));
        }
        next.extend(current.last().copied());
        current = next;
    }
    current
}

/// The full pen pipeline: simplify with the standard tolerance, then smooth.
#[must_use]
pub fn smooth_path(raw: &[Point]) -> Vec<Point> {
    chaikin(&douglas_peucker(raw, SIMPLIFY_TOLERANCE), CHAIKIN_ITERATIONS)
}

/// Snap every point independently to the nearest grid intersection.
#[must_use]
pub fn snap_points(points: &[Point], grid: f64) -> Vec<Point> {
    points.iter().map(|p| snap_to_grid(*p, grid)).collect()
}
