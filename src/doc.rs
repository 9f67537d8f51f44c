//! Document model: stitch primitives, colors, and the ordered store.
//!
//! A [`Stitch`] is one user-drawn primitive. Its geometry lives in the
//! [`Shape`] sum type so every consumer (dashing, hit-testing, rendering)
//! branches exhaustively instead of on string tags. The [`Document`] keeps
//! stitches in insertion order, which doubles as paint order: later entries
//! draw on top and win hit-tests.
//!
//! `Document: Clone` is a structural copy of every stitch, which is what the
//! undo history stores.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Point;
use crate::hit::Handle;

/// Unique identifier for a stitch.
pub type StitchId = Uuid;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for canvas style setters.
    #[must_use]
    pub fn to_css(self) -> String {
        let alpha = f64::from(self.a) / 255.0;
        format!("rgba({}, {}, {}, {alpha:.3})", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry of a filled (cross-hatched) shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FillShape {
    /// Circle with a center handle and an edge handle; `radius` tracks their distance.
    Circle { center: Point, edge: Point, radius: f64 },
    /// Axis-aligned box between two opposite corners.
    Box { a: Point, b: Point },
    /// Triangle with three free vertices.
    Triangle { points: [Point; 3] },
}

impl FillShape {
    /// Geometric center: box midpoint, circle center, or triangle centroid.
    #[must_use]
    pub fn center(&self) -> Point {
        match self {
            Self::Circle { center, .. } => *center,
            Self::Box { a, b } => a.midpoint(*b),
            Self::Triangle { points: [p0, p1, p2] } => {
                Point::new((p0.x + p1.x + p2.x) / 3.0, (p0.y + p1.y + p2.y) / 3.0)
            }
        }
    }

    /// Axis-aligned bounding box as (min, max).
    #[must_use]
    pub fn bounds(&self) -> (Point, Point) {
        match self {
            Self::Circle { center, radius, .. } => (
                Point::new(center.x - radius, center.y - radius),
                Point::new(center.x + radius, center.y + radius),
            ),
            Self::Box { a, b } => box_bounds(*a, *b),
            Self::Triangle { points } => {
                let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
                let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
                let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
                let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
                (Point::new(min_x, min_y), Point::new(max_x, max_y))
            }
        }
    }
}

/// The geometry of a stitch.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line { a: Point, b: Point },
    /// Outline circle. Only the center is draggable; `edge` is kept so the
    /// radius can be recomputed when the center moves.
    Circle { center: Point, edge: Point, radius: f64 },
    Box { a: Point, b: Point },
    /// Quadratic Bezier from `a` to `b` pulled toward `control`.
    Curve { a: Point, control: Point, b: Point },
    /// Open polyline with at least two points.
    Path { points: Vec<Point> },
    /// Cross-hatched shape; the outline itself is never stitched.
    Filled { fill: FillShape, spacing: f64 },
}

impl Shape {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Circle { .. } => "circle",
            Self::Box { .. } => "box",
            Self::Curve { .. } => "curve",
            Self::Path { .. } => "path",
            Self::Filled { fill: FillShape::Circle { .. }, .. } => "fill-circle",
            Self::Filled { fill: FillShape::Box { .. }, .. } => "fill-box",
            Self::Filled { fill: FillShape::Triangle { .. }, .. } => "fill-triangle",
        }
    }
}

/// One user-drawn primitive in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Stitch {
    pub id: StitchId,
    pub color: Color,
    /// Whether the stitch was drawn without grid snapping. Recorded at creation only.
    pub freehand: bool,
    pub shape: Shape,
}

impl Stitch {
    /// Wrap a shape in a new stitch with a fresh id.
    #[must_use]
    pub fn new(shape: Shape, color: Color, freehand: bool) -> Self {
        Self { id: Uuid::new_v4(), color, freehand, shape }
    }

    #[must_use]
    pub fn line(a: Point, b: Point, color: Color, freehand: bool) -> Self {
        Self::new(Shape::Line { a, b }, color, freehand)
    }

    /// Outline circle centered at `center` passing through `edge`.
    #[must_use]
    pub fn circle(center: Point, edge: Point, color: Color, freehand: bool) -> Self {
        Self::new(Shape::Circle { center, edge, radius: center.distance(edge) }, color, freehand)
    }

    #[must_use]
    pub fn rect(a: Point, b: Point, color: Color, freehand: bool) -> Self {
        Self::new(Shape::Box { a, b }, color, freehand)
    }

    #[must_use]
    pub fn curve(a: Point, control: Point, b: Point, color: Color, freehand: bool) -> Self {
        Self::new(Shape::Curve { a, control, b }, color, freehand)
    }

    /// A path stitch, or `None` when fewer than two points remain.
    #[must_use]
    pub fn path(points: Vec<Point>, color: Color, freehand: bool) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self::new(Shape::Path { points }, color, freehand))
    }

    #[must_use]
    pub fn filled(fill: FillShape, spacing: f64, color: Color, freehand: bool) -> Self {
        Self::new(Shape::Filled { fill, spacing }, color, freehand)
    }

    #[must_use]
    pub fn filled_circle(center: Point, edge: Point, spacing: f64, color: Color, freehand: bool) -> Self {
        let fill = FillShape::Circle { center, edge, radius: center.distance(edge) };
        Self::filled(fill, spacing, color, freehand)
    }

    #[must_use]
    pub fn filled_box(a: Point, b: Point, spacing: f64, color: Color, freehand: bool) -> Self {
        Self::filled(FillShape::Box { a, b }, spacing, color, freehand)
    }

    #[must_use]
    pub fn filled_triangle(points: [Point; 3], spacing: f64, color: Color, freehand: bool) -> Self {
        Self::filled(FillShape::Triangle { points }, spacing, color, freehand)
    }

    /// Move one control point to `pos`.
    ///
    /// Circle radii are recomputed from center and edge after the move. Returns
    /// `false` when the handle does not belong to this stitch's shape.
    pub fn move_handle(&mut self, handle: Handle, pos: Point) -> bool {
        match (&mut self.shape, handle) {
            (Shape::Line { a, .. } | Shape::Box { a, .. } | Shape::Curve { a, .. }, Handle::Start) => *a = pos,
            (Shape::Line { b, .. } | Shape::Box { b, .. } | Shape::Curve { b, .. }, Handle::End) => *b = pos,
            (Shape::Curve { control, .. }, Handle::Control) => *control = pos,
            (Shape::Circle { center, edge, radius }, Handle::Start) => {
                *center = pos;
                *radius = center.distance(*edge);
            }
            (Shape::Path { points }, Handle::PathPoint(i)) => {
                let Some(p) = points.get_mut(i) else {
                    return false;
                };
                *p = pos;
            }
            (Shape::Filled { fill, .. }, handle) => return move_fill_handle(fill, handle, pos),
            _ => return false,
        }
        true
    }
}

fn move_fill_handle(fill: &mut FillShape, handle: Handle, pos: Point) -> bool {
    match (fill, handle) {
        (FillShape::Circle { center, edge, radius }, Handle::Start) => {
            *center = pos;
            *radius = center.distance(*edge);
        }
        (FillShape::Circle { center, edge, radius }, Handle::End) => {
            *edge = pos;
            *radius = center.distance(*edge);
        }
        (FillShape::Box { a, .. }, Handle::Start) => *a = pos,
        (FillShape::Box { b, .. }, Handle::End) => *b = pos,
        (FillShape::Triangle { points }, Handle::TrianglePoint(i)) => {
            let Some(p) = points.get_mut(i) else {
                return false;
            };
            *p = pos;
        }
        _ => return false,
    }
    true
}

/// Normalize two opposite corners to (min, max).
#[must_use]
pub fn box_bounds(a: Point, b: Point) -> (Point, Point) {
    (Point::new(a.x.min(b.x), a.y.min(b.y)), Point::new(a.x.max(b.x), a.y.max(b.y)))
}

/// The ordered collection of stitches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    stitches: Vec<Stitch>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stitch on top of everything else and return its id.
    pub fn push(&mut self, stitch: Stitch) -> StitchId {
        let id = stitch.id;
        self.stitches.push(stitch);
        id
    }

    /// Remove a stitch by id, preserving the order of the rest.
    pub fn remove(&mut self, id: &StitchId) -> Option<Stitch> {
        let index = self.stitches.iter().position(|s| &s.id == id)?;
        Some(self.stitches.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &StitchId) -> Option<&Stitch> {
        self.stitches.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &StitchId) -> Option<&mut Stitch> {
        self.stitches.iter_mut().find(|s| &s.id == id)
    }

    /// Stitches in paint order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Stitch> {
        self.stitches.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stitches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stitches.is_empty()
    }

    pub fn clear(&mut self) {
        self.stitches.clear();
    }
}
