#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

pub use crate::geom::Point;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `x` / `y` is the world-space point shown at the viewport center.
/// `zoom` is a scale factor (1.0 = 100%) kept within `[min_zoom, max_zoom]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0, min_zoom: MIN_ZOOM, max_zoom: MAX_ZOOM }
    }
}

impl Camera {
    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
        let center = viewport.center();
        Point {
            x: (world.x - self.x) * self.zoom + center.x,
            y: (world.y - self.y) * self.zoom + center.y,
        }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
        let center = viewport.center();
        Point {
            x: (screen.x - center.x) / self.zoom + self.x,
            y: (screen.y - center.y) / self.zoom + self.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Convert a world-space distance to screen pixels.
    #[must_use]
    pub fn world_dist_to_screen(&self, world_dist: f64) -> f64 {
        world_dist * self.zoom
    }

    /// World-space corners (top-left, bottom-right) of the visible area.
    #[must_use]
    pub fn visible_world_bounds(&self, viewport: Viewport) -> (Point, Point) {
        (
            self.screen_to_world(Point::new(0.0, 0.0), viewport),
            self.screen_to_world(Point::new(viewport.width, viewport.height), viewport),
        )
    }

    /// Set the zoom level, clamped to the camera's bounds. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Scale the zoom by `factor` while keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64, viewport: Viewport) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let before = self.screen_to_world(screen, viewport);
        self.set_zoom(self.zoom * factor);
        let after = self.screen_to_world(screen, viewport);
        self.x += before.x - after.x;
        self.y += before.y - after.y;
    }

    /// Zoom in one step around the viewport center.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zoom out one step around the viewport center.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Drag-pan: place the camera relative to where it was when the drag began.
    pub fn pan_from(&mut self, start_camera: Point, start_screen: Point, current_screen: Point) {
        self.x = start_camera.x - (current_screen.x - start_screen.x) / self.zoom;
        self.y = start_camera.y - (current_screen.y - start_screen.y) / self.zoom;
    }

    /// Back to the origin at 100%.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.zoom = 1.0;
    }

    /// Camera center as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
