#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::doc::Color;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn line(a: Point, b: Point) -> Stitch {
    Stitch::line(a, b, Color::WHITE, true)
}

fn doc_with(stitches: Vec<Stitch>) -> Document {
    let mut doc = Document::new();
    for s in stitches {
        doc.push(s);
    }
    doc
}

fn zoomed(zoom: f64) -> Camera {
    Camera { zoom, ..Camera::default() }
}

// =============================================================
// Control points
// =============================================================

#[test]
fn control_points_line_and_box() {
    let l = line(pt(0.0, 0.0), pt(10.0, 0.0));
    assert_eq!(control_points(&l), vec![(Handle::Start, pt(0.0, 0.0)), (Handle::End, pt(10.0, 0.0))]);
    let b = Stitch::rect(pt(1.0, 2.0), pt(3.0, 4.0), Color::WHITE, true);
    assert_eq!(control_points(&b).len(), 2);
}

#[test]
fn control_points_circle_outline_has_center_only() {
    let c = Stitch::circle(pt(5.0, 5.0), pt(25.0, 5.0), Color::WHITE, true);
    assert_eq!(control_points(&c), vec![(Handle::Start, pt(5.0, 5.0))]);
}

#[test]
fn control_points_filled_circle_has_center_and_edge() {
    let c = Stitch::filled_circle(pt(5.0, 5.0), pt(25.0, 5.0), 20.0, Color::WHITE, true);
    assert_eq!(control_points(&c), vec![(Handle::Start, pt(5.0, 5.0)), (Handle::End, pt(25.0, 5.0))]);
}

#[test]
fn control_points_curve_includes_control() {
    let c = Stitch::curve(pt(0.0, 0.0), pt(50.0, 50.0), pt(100.0, 0.0), Color::WHITE, true);
    let handles: Vec<Handle> = control_points(&c).into_iter().map(|(h, _)| h).collect();
    assert_eq!(handles, vec![Handle::Start, Handle::End, Handle::Control]);
}

#[test]
fn control_points_path_and_triangle_are_indexed() {
    let Some(p) = Stitch::path(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 5.0)], Color::WHITE, true) else {
        panic!("path should build");
    };
    let handles: Vec<Handle> = control_points(&p).into_iter().map(|(h, _)| h).collect();
    assert_eq!(handles, vec![Handle::PathPoint(0), Handle::PathPoint(1), Handle::PathPoint(2)]);

    let t = Stitch::filled_triangle([pt(0.0, 0.0), pt(100.0, 0.0), pt(50.0, 80.0)], 20.0, Color::WHITE, true);
    assert_eq!(control_points(&t)[2], (Handle::TrianglePoint(2), pt(50.0, 80.0)));
}

// =============================================================
// find_control_point_at
// =============================================================

#[test]
fn control_point_within_threshold() {
    let l = line(pt(0.0, 0.0), pt(100.0, 0.0));
    let cam = Camera::default();
    assert_eq!(find_control_point_at(&l, pt(3.0, 4.0), &cam), Some(Handle::Start));
    assert_eq!(find_control_point_at(&l, pt(110.0, 0.0), &cam), Some(Handle::End));
    assert_eq!(find_control_point_at(&l, pt(50.0, 0.0), &cam), None);
}

#[test]
fn control_point_threshold_is_exclusive() {
    let l = line(pt(0.0, 0.0), pt(100.0, 0.0));
    assert_eq!(find_control_point_at(&l, pt(15.0, 0.0), &Camera::default()), None);
}

#[test]
fn control_point_threshold_scales_with_zoom() {
    let l = line(pt(0.0, 0.0), pt(100.0, 0.0));
    // 15 screen px at 2x zoom is 7.5 world units.
    assert_eq!(find_control_point_at(&l, pt(7.0, 0.0), &zoomed(2.0)), Some(Handle::Start));
    assert_eq!(find_control_point_at(&l, pt(8.0, 0.0), &zoomed(2.0)), None);
    assert_eq!(find_control_point_at(&l, pt(20.0, 0.0), &zoomed(0.5)), Some(Handle::Start));
}

#[test]
fn control_point_circle_edge_is_not_a_handle() {
    let c = Stitch::circle(pt(0.0, 0.0), pt(50.0, 0.0), Color::WHITE, true);
    assert_eq!(find_control_point_at(&c, pt(50.0, 0.0), &Camera::default()), None);
}

#[test]
fn control_point_path_vertex_index() {
    let Some(p) = Stitch::path(vec![pt(0.0, 0.0), pt(40.0, 0.0), pt(80.0, 0.0)], Color::WHITE, true) else {
        panic!("path should build");
    };
    assert_eq!(find_control_point_at(&p, pt(41.0, 2.0), &Camera::default()), Some(Handle::PathPoint(1)));
}

// =============================================================
// find_stitch_at
// =============================================================

#[test]
fn empty_document_has_no_hit() {
    assert!(find_stitch_at(pt(0.0, 0.0), &Document::new(), &Camera::default()).is_none());
}

#[test]
fn line_hit_within_ten_pixels() {
    let l = line(pt(0.0, 0.0), pt(100.0, 0.0));
    let id = l.id;
    let doc = doc_with(vec![l]);
    let cam = Camera::default();
    assert_eq!(find_stitch_at(pt(50.0, 9.0), &doc, &cam), Some(Hit::Stitch(id)));
    assert!(find_stitch_at(pt(50.0, 11.0), &doc, &cam).is_none());
}

#[test]
fn topmost_stitch_wins() {
    let bottom = line(pt(0.0, 0.0), pt(100.0, 0.0));
    let top = line(pt(0.0, 2.0), pt(100.0, 2.0));
    let top_id = top.id;
    let doc = doc_with(vec![bottom, top]);
    assert_eq!(find_stitch_at(pt(50.0, 1.0), &doc, &Camera::default()), Some(Hit::Stitch(top_id)));
}

#[test]
fn circle_hit_on_ring_only() {
    let c = Stitch::circle(pt(0.0, 0.0), pt(50.0, 0.0), Color::WHITE, true);
    let id = c.id;
    let doc = doc_with(vec![c]);
    let cam = Camera::default();
    assert_eq!(find_stitch_at(pt(0.0, 45.0), &doc, &cam), Some(Hit::Stitch(id)));
    assert!(find_stitch_at(pt(0.0, 0.0), &doc, &cam).is_none());
}

#[test]
fn box_hit_on_any_side() {
    let b = Stitch::rect(pt(0.0, 0.0), pt(100.0, 60.0), Color::WHITE, true);
    let id = b.id;
    let doc = doc_with(vec![b]);
    let cam = Camera::default();
    assert_eq!(find_stitch_at(pt(50.0, 58.0), &doc, &cam), Some(Hit::Stitch(id)));
    assert_eq!(find_stitch_at(pt(-5.0, 30.0), &doc, &cam), Some(Hit::Stitch(id)));
    assert!(find_stitch_at(pt(50.0, 30.0), &doc, &cam).is_none());
}

#[test]
fn curve_hit_follows_bend() {
    let c = Stitch::curve(pt(0.0, 0.0), pt(50.0, 100.0), pt(100.0, 0.0), Color::WHITE, true);
    let id = c.id;
    let doc = doc_with(vec![c]);
    let cam = Camera::default();
    // Apex at t = 0.5 is (50, 50).
    assert_eq!(find_stitch_at(pt(50.0, 48.0), &doc, &cam), Some(Hit::Stitch(id)));
    assert!(find_stitch_at(pt(50.0, 0.0), &doc, &cam).is_none());
}

#[test]
fn path_hit_on_any_leg() {
    let Some(p) = Stitch::path(vec![pt(0.0, 0.0), pt(50.0, 0.0), pt(50.0, 50.0)], Color::WHITE, true) else {
        panic!("path should build");
    };
    let id = p.id;
    let doc = doc_with(vec![p]);
    assert_eq!(find_stitch_at(pt(52.0, 40.0), &doc, &Camera::default()), Some(Hit::Stitch(id)));
}

#[test]
fn stroke_threshold_scales_with_zoom() {
    let l = line(pt(0.0, 0.0), pt(100.0, 0.0));
    let doc = doc_with(vec![l]);
    assert!(find_stitch_at(pt(50.0, 9.0), &doc, &zoomed(2.0)).is_none());
    assert!(find_stitch_at(pt(50.0, 4.0), &doc, &zoomed(2.0)).is_some());
}

// =============================================================
// Filled shapes
// =============================================================

#[test]
fn fill_line_hit_takes_priority() {
    let b = Stitch::filled_box(pt(-50.0, -50.0), pt(50.0, 50.0), 20.0, Color::WHITE, true);
    let id = b.id;
    let doc = doc_with(vec![b]);
    let Some(Hit::FillLine { id: hit_id, line }) = find_stitch_at(pt(-45.0, -20.0), &doc, &Camera::default()) else {
        panic!("expected fill line hit");
    };
    assert_eq!(hit_id, id);
    assert_eq!(line, Segment::new(pt(-40.0, -50.0), pt(-40.0, 50.0)));
}

#[test]
fn filled_box_outline_hit_away_from_fill_lines() {
    let b = Stitch::filled_box(pt(-50.0, -50.0), pt(50.0, 50.0), 20.0, Color::WHITE, true);
    let id = b.id;
    let doc = doc_with(vec![b]);
    assert_eq!(find_stitch_at(pt(-52.0, -20.0), &doc, &Camera::default()), Some(Hit::Stitch(id)));
}

#[test]
fn filled_triangle_outline_hit() {
    let t = Stitch::filled_triangle([pt(0.0, 0.0), pt(200.0, 0.0), pt(100.0, 160.0)], 20.0, Color::WHITE, true);
    let id = t.id;
    let doc = doc_with(vec![t]);
    // Below the base, far from any fill chord.
    let hit = find_stitch_at(pt(190.0, -5.0), &doc, &Camera::default());
    assert_eq!(hit.map(|h| h.stitch_id()), Some(id));
}

#[test]
fn filled_circle_interior_between_lines_misses() {
    let c = Stitch::filled_circle(pt(0.0, 0.0), pt(100.0, 0.0), 20.0, Color::WHITE, true);
    let doc = doc_with(vec![c]);
    assert!(find_stitch_at(pt(20.0, 20.0), &doc, &Camera::default()).is_none());
}

// =============================================================
// find_containing_shape
// =============================================================

#[test]
fn containing_shape_ignores_outlines() {
    let b = Stitch::rect(pt(0.0, 0.0), pt(100.0, 100.0), Color::WHITE, true);
    let doc = doc_with(vec![b]);
    assert!(find_containing_shape(pt(50.0, 50.0), &doc).is_none());
}

#[test]
fn containing_shape_per_fill_kind() {
    let c = Stitch::filled_circle(pt(0.0, 0.0), pt(30.0, 0.0), 20.0, Color::WHITE, true);
    let b = Stitch::filled_box(pt(100.0, 100.0), pt(50.0, 50.0), 20.0, Color::WHITE, true);
    let t = Stitch::filled_triangle([pt(200.0, 0.0), pt(300.0, 0.0), pt(250.0, 80.0)], 20.0, Color::WHITE, true);
    let (cid, bid, tid) = (c.id, b.id, t.id);
    let doc = doc_with(vec![c, b, t]);
    assert_eq!(find_containing_shape(pt(30.0, 0.0), &doc), Some(cid));
    assert_eq!(find_containing_shape(pt(75.0, 60.0), &doc), Some(bid));
    assert_eq!(find_containing_shape(pt(250.0, 20.0), &doc), Some(tid));
    assert!(find_containing_shape(pt(150.0, 150.0), &doc).is_none());
}

#[test]
fn containing_shape_prefers_topmost() {
    let lower = Stitch::filled_box(pt(0.0, 0.0), pt(100.0, 100.0), 20.0, Color::WHITE, true);
    let upper = Stitch::filled_circle(pt(50.0, 50.0), pt(70.0, 50.0), 20.0, Color::WHITE, true);
    let upper_id = upper.id;
    let doc = doc_with(vec![lower, upper]);
    assert_eq!(find_containing_shape(pt(50.0, 50.0), &doc), Some(upper_id));
}
