//! Input model: tools, modifier keys, mouse buttons, selection, and the
//! gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture being tracked between pointer events.
//! Unlike a plain drag, some tools span several presses (a curve needs its
//! control point placed after the first release, a triangle takes three
//! clicks), so the in-progress geometry lives in the state itself.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::StitchId;
use crate::geom::Segment;
use crate::hit::{Handle, Hit};

/// Which drawing tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Straight running stitch (default).
    #[default]
    Line,
    /// Outline circle dragged from its center.
    Circle,
    /// Outline box dragged corner to corner.
    Box,
    /// Quadratic curve: drag the chord, then click the control point.
    Curve,
    /// Freehand path, simplified and smoothed on release.
    Pen,
    /// Cross-hatched circle.
    FillCircle,
    /// Cross-hatched box.
    FillBox,
    /// Cross-hatched triangle placed with three clicks.
    FillTriangle,
}

impl Tool {
    /// Parse a tool name as used by the host UI (`"line"`, `"fillCircle"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "line" => Some(Self::Line),
            "circle" => Some(Self::Circle),
            "box" => Some(Self::Box),
            "curve" => Some(Self::Curve),
            "pen" => Some(Self::Pen),
            "fillCircle" => Some(Self::FillCircle),
            "fillBox" => Some(Self::FillBox),
            "fillTriangle" => Some(Self::FillTriangle),
            _ => None,
        }
    }

    /// Whether this tool creates a cross-hatched shape.
    #[must_use]
    pub fn is_fill(self) -> bool {
        matches!(self, Self::FillCircle | Self::FillBox | Self::FillTriangle)
    }

    /// Whether this tool is a single press-drag-release between two points.
    #[must_use]
    pub fn is_two_point(self) -> bool {
        matches!(self, Self::Line | Self::Circle | Self::Box | Self::FillCircle | Self::FillBox)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button; always pans.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"g"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space" || self.0 == "Spacebar"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What the user has selected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    /// A whole stitch.
    Primitive(StitchId),
    /// A single hatch line of a filled shape. Has no draggable handles.
    FillLine { id: StitchId, line: Segment },
}

impl Selection {
    /// The selected stitch (for a fill line, its parent shape).
    #[must_use]
    pub fn stitch_id(&self) -> Option<StitchId> {
        match self {
            Self::None => None,
            Self::Primitive(id) | Self::FillLine { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<Hit> for Selection {
    fn from(hit: Hit) -> Self {
        match hit {
            Hit::Stitch(id) => Self::Primitive(id),
            Hit::FillLine { id, line } => Self::FillLine { id, line },
        }
    }
}

/// Persistent UI state visible to the renderer.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// In selection mode presses pick and drag stitches instead of drawing.
    pub selection_mode: bool,
    pub selection: Selection,
    /// The last grabbed control point; stays active after release so the
    /// path-point edit keys can act on it.
    pub active_handle: Option<Handle>,
    pub show_grid: bool,
    /// Last known pointer position in screen space.
    pub pointer_screen: Option<Point>,
    /// Space bar is held: presses pan instead of draw.
    pub space_held: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selection_mode: false,
            selection: Selection::None,
            active_handle: None,
            show_grid: true,
            pointer_screen: None,
            space_held: false,
        }
    }
}

impl UiState {
    /// Drop the selection and its active handle.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
        self.active_handle = None;
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the geometry captured so far; the committed
/// stitch is only built once the gesture completes.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view. The interrupted gesture is restored when the pan ends.
    Panning {
        /// Screen position where the drag started.
        start_screen: Point,
        /// Camera center when the drag started.
        start_camera: Point,
        resume: Box<InputState>,
    },
    /// Dragging out a two-point primitive from `anchor`.
    DrawingShape { tool: Tool, anchor: Point },
    /// Curve start placed; waiting for the press that places the control point.
    PlacingCurveControl { anchor: Point },
    /// Curve control placed; the release commits the end point.
    DrawingCurve { anchor: Point, control: Point },
    /// Triangle vertices placed so far (one or two).
    PlacingTriangle { points: Vec<Point> },
    /// Raw pen samples in world space.
    DrawingPath { raw: Vec<Point> },
    /// Dragging a control point of a selected stitch.
    DraggingHandle {
        id: StitchId,
        handle: Handle,
        /// Set on the first move; the undo snapshot is taken then.
        moved: bool,
    },
}

impl InputState {
    /// Whether a multi-step drawing gesture is waiting for more input.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        if let Self::Panning { resume, .. } = self {
            return resume.is_drawing();
        }
        matches!(
            self,
            Self::DrawingShape { .. }
                | Self::PlacingCurveControl { .. }
                | Self::DrawingCurve { .. }
                | Self::PlacingTriangle { .. }
                | Self::DrawingPath { .. }
        )
    }

    /// Start a pan on top of the current gesture. A pan already in progress
    /// keeps its own start point.
    pub fn begin_pan(&mut self, start_screen: Point, start_camera: Point) {
        if matches!(self, Self::Panning { .. }) {
            return;
        }
        let resume = Box::new(std::mem::take(self));
        *self = Self::Panning { start_screen, start_camera, resume };
    }

    /// Finish a pan and return to the gesture it interrupted. Returns `false`
    /// when no pan was in progress.
    pub fn end_pan(&mut self) -> bool {
        let Self::Panning { resume, .. } = self else {
            return false;
        };
        let resumed = std::mem::take(resume.as_mut());
        *self = resumed;
        true
    }
}
