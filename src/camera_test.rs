#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn vp() -> Viewport {
    Viewport::new(800.0, 600.0)
}

// --- Camera defaults ---

#[test]
fn camera_default_is_origin_at_full_scale() {
    let cam = Camera::default();
    assert_eq!(cam.x, 0.0);
    assert_eq!(cam.y, 0.0);
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.min_zoom, 0.1);
    assert_eq!(cam.max_zoom, 5.0);
}

#[test]
fn viewport_center() {
    assert_eq!(vp().center(), Point::new(400.0, 300.0));
}

// --- world_to_screen / screen_to_world ---

#[test]
fn world_origin_maps_to_viewport_center() {
    let cam = Camera::default();
    let s = cam.world_to_screen(Point::new(0.0, 0.0), vp());
    assert!(point_approx_eq(s, Point::new(400.0, 300.0)));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { x: 10.0, y: -20.0, zoom: 2.0, ..Camera::default() };
    let s = cam.world_to_screen(Point::new(20.0, 0.0), vp());
    assert!(point_approx_eq(s, Point::new(420.0, 340.0)));
}

#[test]
fn screen_to_world_with_zoom() {
    let cam = Camera { zoom: 4.0, ..Camera::default() };
    let w = cam.screen_to_world(Point::new(440.0, 380.0), vp());
    assert!(point_approx_eq(w, Point::new(10.0, 20.0)));
}

#[test]
fn round_trip_across_camera_states() {
    let cams = [
        Camera::default(),
        Camera { x: 123.4, y: -56.7, zoom: 0.1, ..Camera::default() },
        Camera { x: -9000.0, y: 42.0, zoom: 5.0, ..Camera::default() },
        Camera { x: 0.5, y: 0.25, zoom: 1.37, ..Camera::default() },
    ];
    let points = [
        Point::new(0.0, 0.0),
        Point::new(-250.5, 999.25),
        Point::new(1e5, -1e5),
        Point::new(3.3, 7.7),
    ];
    for cam in cams {
        for p in points {
            let back = cam.screen_to_world(cam.world_to_screen(p, vp()), vp());
            assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6, "{cam:?} {p:?} -> {back:?}");
        }
    }
}

#[test]
fn screen_dist_to_world_divides_by_zoom() {
    let cam = Camera { zoom: 2.0, ..Camera::default() };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 5.0));
    assert!(approx_eq(cam.world_dist_to_screen(5.0), 10.0));
}

#[test]
fn visible_bounds_at_default_camera() {
    let (tl, br) = Camera::default().visible_world_bounds(vp());
    assert!(point_approx_eq(tl, Point::new(-400.0, -300.0)));
    assert!(point_approx_eq(br, Point::new(400.0, 300.0)));
}

// --- Zoom ---

#[test]
fn zoom_in_multiplies_by_step() {
    let mut cam = Camera::default();
    cam.zoom_in();
    assert!(approx_eq(cam.zoom, 1.2));
}

#[test]
fn zoom_out_divides_by_step() {
    let mut cam = Camera::default();
    cam.zoom_out();
    assert!(approx_eq(cam.zoom, 1.0 / 1.2));
}

#[test]
fn zoom_clamped_after_any_sequence() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.zoom_in();
        assert!(cam.zoom <= cam.max_zoom);
    }
    assert_eq!(cam.zoom, 5.0);
    for _ in 0..200 {
        cam.zoom_out();
        assert!(cam.zoom >= cam.min_zoom);
    }
    assert_eq!(cam.zoom, 0.1);
    for i in 0..50 {
        let factor = if i % 3 == 0 { 0.9 } else { 1.1 };
        cam.zoom_at(Point::new(13.0, 77.0), factor, vp());
        assert!(cam.zoom >= cam.min_zoom && cam.zoom <= cam.max_zoom);
    }
}

#[test]
fn set_zoom_ignores_nan() {
    let mut cam = Camera::default();
    cam.set_zoom(f64::NAN);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn zoom_at_keeps_point_under_cursor_fixed() {
    let mut cam = Camera { x: 30.0, y: -12.0, ..Camera::default() };
    let cursor = Point::new(650.0, 120.0);
    let before = cam.screen_to_world(cursor, vp());
    cam.zoom_at(cursor, 1.1, vp());
    let after = cam.screen_to_world(cursor, vp());
    assert!(point_approx_eq(before, after));
    assert!(approx_eq(cam.zoom, 1.1));
}

#[test]
fn zoom_at_when_clamped_still_keeps_point_fixed() {
    let mut cam = Camera { zoom: 4.9, ..Camera::default() };
    let cursor = Point::new(10.0, 10.0);
    let before = cam.screen_to_world(cursor, vp());
    cam.zoom_at(cursor, 1.1, vp());
    assert_eq!(cam.zoom, 5.0);
    assert!(point_approx_eq(before, cam.screen_to_world(cursor, vp())));
}

#[test]
fn zoom_at_rejects_non_positive_factor() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), 0.0, vp());
    cam.zoom_at(Point::new(0.0, 0.0), -2.0, vp());
    assert_eq!(cam, Camera::default());
}

// --- Pan / reset ---

#[test]
fn pan_from_moves_opposite_to_drag_scaled_by_zoom() {
    let mut cam = Camera { zoom: 2.0, ..Camera::default() };
    cam.pan_from(Point::new(100.0, 50.0), Point::new(10.0, 10.0), Point::new(30.0, 0.0));
    assert!(approx_eq(cam.x, 90.0));
    assert!(approx_eq(cam.y, 55.0));
}

#[test]
fn reset_restores_origin_and_zoom() {
    let mut cam = Camera { x: 5.0, y: 6.0, zoom: 3.0, ..Camera::default() };
    cam.reset();
    assert_eq!(cam, Camera::default());
}
