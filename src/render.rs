//! Rendering: draws one frame of the pattern editor to a [`Surface`].
//!
//! The renderer works in screen space. World geometry is converted through the
//! camera and stroke widths are multiplied by the zoom, so a stitch keeps its
//! proportions at every scale. It only reads state; nothing here mutates the
//! document, camera, or UI.
//!
//! Paint order is background, grid, stitches, selection highlight, handles,
//! in-progress preview, then the screen-space overlay text.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Viewport};
use crate::consts::{
    ACTIVE_HANDLE_DIAMETER, CURVE_HIT_CHORDS, GRID_DOT_DIAMETER, GRID_DOT_MIN_SPACING_PX, HANDLE_DIAMETER,
    HIGHLIGHT_WEIGHT, PREVIEW_ALPHA, STITCH_WEIGHT, TRIANGLE_GUIDE_WEIGHT,
};
use crate::dash::{dash_line, shape_segments};
use crate::doc::{Color, Document, FillShape, Shape, Stitch, box_bounds};
use crate::geom::{Point, Segment, sample_quad_bezier};
use crate::hit::{Handle, control_points};
use crate::input::{InputState, Selection, Tool, UiState};
use crate::style::{DashSpec, StitchStyle};

const BACKGROUND: Color = Color::rgb(20, 30, 60);
const GRID_LINE: Color = Color::rgba(255, 255, 255, 40);
const GRID_DOT: Color = Color::rgba(255, 255, 255, 80);
const HIGHLIGHT: Color = Color::rgba(255, 255, 0, 100);
const HANDLE: Color = Color::rgb(255, 255, 0);
const ACTIVE_HANDLE: Color = Color::rgb(255, 100, 100);
const MERGE_GUIDE: Color = Color::rgba(255, 100, 100, 150);
const CONTROL_HANDLE: Color = Color::rgb(255, 150, 0);
const CONTROL_GUIDE: Color = Color::rgba(255, 150, 0, 100);
const HINT_TEXT: Color = Color::rgba(255, 255, 255, 150);

const GRID_LINE_WEIGHT: f64 = 1.0;
const MERGE_GUIDE_WEIGHT: f64 = 2.0;
const CONTROL_GUIDE_WEIGHT: f64 = 1.0;

/// Overlay text margin from the viewport edge, in screen pixels.
const OVERLAY_MARGIN: f64 = 10.0;
const ZOOM_TEXT_SIZE: f64 = 14.0;
const HINT_TEXT_SIZE: f64 = 12.0;

pub const NAVIGATION_HINT: &str = "Space+Drag: Pan  |  Scroll: Zoom  |  0: Reset View";
pub const PANNING_HINT: &str = "Panning... (Release Space)";
pub const PATH_POINT_HINT: &str = "(Del): Delete Point  |  (M): Merge with Next";

/// Horizontal anchor of a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Bottom,
}

/// A 2D drawing target in screen space (CSS pixels).
///
/// Stroke and fill state is sticky: it applies to every following draw call
/// until changed. Circles are given by diameter.
pub trait Surface {
    type Error;

    /// Current size of the surface.
    fn viewport(&self) -> Viewport;

    /// Fill the whole surface with `color`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;

    /// Stroke color and width for subsequent outlines. Line caps are round.
    fn set_stroke(&mut self, color: Color, width: f64);

    fn set_fill(&mut self, color: Color);

    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn line(&mut self, a: Point, b: Point) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn fill_circle(&mut self, center: Point, diameter: f64) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn stroke_circle(&mut self, center: Point, diameter: f64) -> Result<(), Self::Error>;

    /// Outline an axis-aligned rectangle with top-left corner `min`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn stroke_rect(&mut self, min: Point, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Stroke connected segments through `points`, closing back to the first
    /// point when `closed` is set.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn polyline(&mut self, points: &[Point], closed: bool) -> Result<(), Self::Error>;

    /// Draw `text` in the current fill color.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the draw call fails.
    fn text(
        &mut self,
        text: &str,
        at: Point,
        size: f64,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Result<(), Self::Error>;
}

/// Draw the full frame.
///
/// # Errors
///
/// Returns the first error reported by the surface.
pub fn draw<S: Surface>(
    surface: &mut S,
    doc: &Document,
    camera: &Camera,
    style: &StitchStyle,
    ui: &UiState,
    input: &InputState,
) -> Result<(), S::Error> {
    let viewport = surface.viewport();
    let mut frame = Frame { surface, camera, viewport };

    // Layer 1: background and grid.
    frame.surface.clear(BACKGROUND)?;
    if ui.show_grid {
        frame.grid(style.grid_size)?;
    }

    // Layer 2: stitches in paint order.
    let spec = style.dash_spec();
    for stitch in doc.iter() {
        frame.segments(&shape_segments(&stitch.shape, spec), stitch.color, STITCH_WEIGHT)?;
    }

    // Layer 3: selection.
    match ui.selection {
        Selection::None => {}
        Selection::FillLine { line, .. } => frame.fill_line_highlight(line)?,
        Selection::Primitive(id) => {
            if let Some(stitch) = doc.get(&id) {
                frame.highlight(&stitch.shape)?;
                frame.handles(stitch, ui.active_handle)?;
            }
        }
    }

    // Layer 4: the gesture in progress.
    frame.preview(input, ui, style, spec)?;

    // Layer 5: screen-space overlay.
    frame.overlay(doc, ui, input)
}

/// Per-frame drawing context: surface plus the transform for this frame.
struct Frame<'a, S: Surface> {
    surface: &'a mut S,
    camera: &'a Camera,
    viewport: Viewport,
}

impl<S: Surface> Frame<'_, S> {
    fn to_screen(&self, p: Point) -> Point {
        self.camera.world_to_screen(p, self.viewport)
    }

    /// World length to screen pixels.
    fn scaled(&self, world: f64) -> f64 {
        world * self.camera.zoom
    }

    fn stroke(&mut self, color: Color, world_width: f64) {
        let width = self.scaled(world_width);
        self.surface.set_stroke(color, width);
    }

    fn line(&mut self, a: Point, b: Point) -> Result<(), S::Error> {
        let (a, b) = (self.to_screen(a), self.to_screen(b));
        self.surface.line(a, b)
    }

    fn polyline(&mut self, points: &[Point], closed: bool) -> Result<(), S::Error> {
        let screen: Vec<Point> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.surface.polyline(&screen, closed)
    }

    fn dot(&mut self, center: Point, world_diameter: f64) -> Result<(), S::Error> {
        let (center, diameter) = (self.to_screen(center), self.scaled(world_diameter));
        self.surface.fill_circle(center, diameter)
    }

    fn segments(&mut self, segments: &[Segment], color: Color, world_width: f64) -> Result<(), S::Error> {
        if segments.is_empty() {
            return Ok(());
        }
        self.stroke(color, world_width);
        for seg in segments {
            self.line(seg.a, seg.b)?;
        }
        Ok(())
    }

    // =============================================================
    // Grid
    // =============================================================

    fn grid(&mut self, grid: f64) -> Result<(), S::Error> {
        if !(grid.is_finite() && grid > 0.0) {
            return Ok(());
        }
        let (top_left, bottom_right) = self.camera.visible_world_bounds(self.viewport);
        let min_x = (top_left.x / grid).floor() * grid - grid;
        let max_x = (bottom_right.x / grid).ceil() * grid + grid;
        let min_y = (top_left.y / grid).floor() * grid - grid;
        let max_y = (bottom_right.y / grid).ceil() * grid + grid;

        self.stroke(GRID_LINE, GRID_LINE_WEIGHT);
        let mut x = min_x;
        while x <= max_x {
            self.line(Point::new(x, min_y), Point::new(x, max_y))?;
            x += grid;
        }
        let mut y = min_y;
        while y <= max_y {
            self.line(Point::new(min_x, y), Point::new(max_x, y))?;
            y += grid;
        }

        if self.camera.world_dist_to_screen(grid) < GRID_DOT_MIN_SPACING_PX {
            return Ok(());
        }
        self.surface.set_fill(GRID_DOT);
        let mut x = min_x;
        while x <= max_x {
            let mut y = min_y;
            while y <= max_y {
                self.dot(Point::new(x, y), GRID_DOT_DIAMETER)?;
                y += grid;
            }
            x += grid;
        }
        Ok(())
    }

    // =============================================================
    // Selection
    // =============================================================

    fn fill_line_highlight(&mut self, line: Segment) -> Result<(), S::Error> {
        self.stroke(HIGHLIGHT, HIGHLIGHT_WEIGHT);
        self.line(line.a, line.b)?;
        self.surface.set_fill(HANDLE);
        self.dot(line.a, HANDLE_DIAMETER)?;
        self.dot(line.b, HANDLE_DIAMETER)
    }

    fn highlight(&mut self, shape: &Shape) -> Result<(), S::Error> {
        self.stroke(HIGHLIGHT, HIGHLIGHT_WEIGHT);
        match shape {
            Shape::Line { a, b } => self.line(*a, *b),
            Shape::Circle { center, radius, .. } => self.ring(*center, *radius),
            Shape::Box { a, b } => self.outline_box(*a, *b),
            Shape::Curve { a, control, b } => {
                self.polyline(&sample_quad_bezier(*a, *control, *b, CURVE_HIT_CHORDS), false)
            }
            Shape::Path { points } => self.polyline(points, false),
            Shape::Filled { fill, .. } => match fill {
                FillShape::Circle { center, radius, .. } => self.ring(*center, *radius),
                FillShape::Box { a, b } => self.outline_box(*a, *b),
                FillShape::Triangle { points } => self.polyline(points, true),
            },
        }
    }

    fn ring(&mut self, center: Point, radius: f64) -> Result<(), S::Error> {
        let (center, diameter) = (self.to_screen(center), self.scaled(radius * 2.0));
        self.surface.stroke_circle(center, diameter)
    }

    fn outline_box(&mut self, a: Point, b: Point) -> Result<(), S::Error> {
        let (min, max) = box_bounds(a, b);
        let (width, height) = (self.scaled(max.x - min.x), self.scaled(max.y - min.y));
        let min = self.to_screen(min);
        self.surface.stroke_rect(min, width, height)
    }

    fn handles(&mut self, stitch: &Stitch, active: Option<Handle>) -> Result<(), S::Error> {
        if let Shape::Curve { a, control, b } = &stitch.shape {
            self.stroke(CONTROL_GUIDE, CONTROL_GUIDE_WEIGHT);
            self.line(*a, *control)?;
            self.line(*control, *b)?;
        }
        if let (Some(Handle::PathPoint(i)), Shape::Path { points }) = (active, &stitch.shape) {
            if let (Some(p), Some(next)) = (points.get(i), points.get(i + 1)) {
                self.stroke(MERGE_GUIDE, MERGE_GUIDE_WEIGHT);
                self.line(*p, *next)?;
            }
        }

        for (handle, p) in control_points(stitch) {
            let (color, diameter) = if Some(handle) == active {
                (ACTIVE_HANDLE, ACTIVE_HANDLE_DIAMETER)
            } else if handle == Handle::Control {
                (CONTROL_HANDLE, HANDLE_DIAMETER)
            } else {
                (HANDLE, HANDLE_DIAMETER)
            };
            self.surface.set_fill(color);
            self.dot(p, diameter)?;
        }
        Ok(())
    }

    // =============================================================
    // Previews
    // =============================================================

    fn preview(&mut self, input: &InputState, ui: &UiState, style: &StitchStyle, spec: DashSpec) -> Result<(), S::Error> {
        let Some(pointer_screen) = ui.pointer_screen else {
            return Ok(());
        };
        let raw = self.camera.screen_to_world(pointer_screen, self.viewport);
        let pointer = style.snap(raw);

        match input {
            InputState::DrawingShape { tool, anchor } => {
                let Some(shape) = preview_shape(*tool, *anchor, pointer, style.grid_size) else {
                    return Ok(());
                };
                let color = if tool.is_fill() { style.color.with_alpha(PREVIEW_ALPHA) } else { style.color };
                self.segments(&shape_segments(&shape, spec), color, STITCH_WEIGHT)
            }
            InputState::PlacingCurveControl { anchor } => {
                self.segments(&dash_line(*anchor, pointer, spec), Color::WHITE.with_alpha(PREVIEW_ALPHA), STITCH_WEIGHT)
            }
            InputState::DrawingCurve { anchor, control } => {
                let shape = Shape::Curve { a: *anchor, control: *control, b: pointer };
                self.segments(&shape_segments(&shape, spec), style.color, STITCH_WEIGHT)
            }
            InputState::PlacingTriangle { points } => match points.as_slice() {
                [first] => {
                    self.stroke(style.color, TRIANGLE_GUIDE_WEIGHT);
                    self.line(*first, pointer)
                }
                [first, second] => {
                    let shape = Shape::Filled {
                        fill: FillShape::Triangle { points: [*first, *second, pointer] },
                        spacing: style.grid_size,
                    };
                    self.segments(&shape_segments(&shape, spec), style.color.with_alpha(PREVIEW_ALPHA), STITCH_WEIGHT)
                }
                _ => Ok(()),
            },
            InputState::DrawingPath { raw: samples } => {
                let Some(last) = samples.last() else {
                    return Ok(());
                };
                self.stroke(style.color, STITCH_WEIGHT);
                if samples.len() > 1 {
                    self.polyline(samples, false)?;
                }
                self.line(*last, raw)
            }
            InputState::Panning { resume, .. } => self.preview(resume, ui, style, spec),
            InputState::Idle | InputState::DraggingHandle { .. } => Ok(()),
        }
    }

    // =============================================================
    // Overlay
    // =============================================================

    fn overlay(&mut self, doc: &Document, ui: &UiState, input: &InputState) -> Result<(), S::Error> {
        let Viewport { width, height } = self.viewport;

        self.surface.set_fill(Color::WHITE);
        self.surface.text(
            &zoom_label(self.camera.zoom),
            Point::new(width - OVERLAY_MARGIN, OVERLAY_MARGIN),
            ZOOM_TEXT_SIZE,
            TextAlign::Right,
            TextBaseline::Top,
        )?;

        if matches!(input, InputState::Panning { .. }) {
            self.surface.text(
                PANNING_HINT,
                Point::new(width * 0.5, OVERLAY_MARGIN),
                HINT_TEXT_SIZE,
                TextAlign::Center,
                TextBaseline::Top,
            )?;
        } else {
            self.surface.set_fill(HINT_TEXT);
            self.surface.text(
                NAVIGATION_HINT,
                Point::new(OVERLAY_MARGIN, height - OVERLAY_MARGIN),
                HINT_TEXT_SIZE,
                TextAlign::Left,
                TextBaseline::Bottom,
            )?;
        }

        let Some(point) = active_path_point(doc, ui) else {
            return Ok(());
        };
        let at = self.to_screen(point) + Point::new(OVERLAY_MARGIN, -OVERLAY_MARGIN);
        self.surface.set_fill(Color::WHITE);
        self.surface.text(PATH_POINT_HINT, at, HINT_TEXT_SIZE, TextAlign::Left, TextBaseline::Bottom)
    }
}

/// Shape a two-point tool would commit if released at `pointer`.
fn preview_shape(tool: Tool, anchor: Point, pointer: Point, spacing: f64) -> Option<Shape> {
    let radius = anchor.distance(pointer);
    let shape = match tool {
        Tool::Line => Shape::Line { a: anchor, b: pointer },
        Tool::Circle => Shape::Circle { center: anchor, edge: pointer, radius },
        Tool::Box => Shape::Box { a: anchor, b: pointer },
        Tool::FillCircle => Shape::Filled { fill: FillShape::Circle { center: anchor, edge: pointer, radius }, spacing },
        Tool::FillBox => Shape::Filled { fill: FillShape::Box { a: anchor, b: pointer }, spacing },
        Tool::Curve | Tool::Pen | Tool::FillTriangle => return None,
    };
    Some(shape)
}

/// World position of the active path point, when a path is selected.
fn active_path_point(doc: &Document, ui: &UiState) -> Option<Point> {
    let Selection::Primitive(id) = ui.selection else {
        return None;
    };
    let Some(Handle::PathPoint(i)) = ui.active_handle else {
        return None;
    };
    match &doc.get(&id)?.shape {
        Shape::Path { points } => points.get(i).copied(),
        _ => None,
    }
}

/// Overlay label for the zoom level, e.g. `"Zoom: 150%"`.
#[must_use]
pub fn zoom_label(zoom: f64) -> String {
    format!("Zoom: {:.0}%", (zoom * 100.0).round())
}
