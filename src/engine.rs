//! The session object: owns the document, camera, style, selection, and undo
//! history, and turns input events into document mutations.
//!
//! Every handler runs to completion and returns the [`Action`]s the host
//! should react to. Nothing here touches the browser; [`crate::web::Engine`]
//! wraps an `EngineCore` together with the canvas element.

use tracing::{debug, info, warn};

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{MIN_EXTENT_PX, PEN_SAMPLE_PX, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::doc::{Color, Document, Shape, Stitch, StitchId};
use crate::geom::triangle_area;
use crate::hit::{self, Handle};
use crate::history::History;
use crate::input::{Button, InputState, Key, Modifiers, Selection, Tool, UiState, WheelDelta};
use crate::render::{self, Surface};
use crate::simplify::{smooth_path, snap_points};
use crate::style::{ConfigError, StitchStyle};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// File stem the host uses when saving a raster snapshot.
pub const PATTERN_FILE_STEM: &str = "sashiko-pattern";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    RenderNeeded,
    StitchCreated(StitchId),
    StitchUpdated(StitchId),
    StitchDeleted(StitchId),
    DocumentCleared,
    DocumentRestored,
    /// A user-visible message, e.g. a rejected edit.
    Notice(String),
    /// The host should save the current frame as an image.
    SavePatternRequested { file_stem: String },
}

/// Rejected document edits. The document is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no path point is selected")]
    NoPathPointSelected,
    #[error("Cannot delete point - path needs at least 2 points. Delete the entire path instead.")]
    PathTooShort { len: usize },
    #[error("Cannot merge - this is the last point. Select an earlier point to merge with the next one.")]
    MergeAtLastPoint,
    #[error("Cannot merge - path needs at least 3 points.")]
    MergeNeedsThreePoints { len: usize },
    #[error("Cannot delete a single fill line - select the whole shape instead.")]
    FillLineNotEditable,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub doc: Document,
    pub camera: Camera,
    pub style: StitchStyle,
    pub ui: UiState,
    pub input: InputState,
    pub history: History,
    pub viewport: Viewport,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with a host-supplied style.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found while validating `style`.
    pub fn with_style(style: StitchStyle) -> Result<Self, ConfigError> {
        style.validate()?;
        Ok(Self { style, ..Self::default() })
    }

    // --- Configuration ---

    /// Update viewport dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    /// Replace the stitch style wholesale.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found; the current style is kept.
    pub fn set_style(&mut self, style: StitchStyle) -> Result<(), ConfigError> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Change the drawing color. A selected stitch is recolored too; a
    /// selected fill line recolors its parent shape.
    pub fn set_color(&mut self, color: Color) -> Vec<Action> {
        self.style.set_color(color);

        let Some(id) = self.ui.selection.stitch_id() else {
            return vec![Action::RenderNeeded];
        };
        if self.doc.get(&id).is_none_or(|s| s.color == color) {
            return vec![Action::RenderNeeded];
        }

        self.history.save_state(&self.doc);
        if let Some(stitch) = self.doc.get_mut(&id) {
            stitch.color = color;
        }
        vec![Action::StitchUpdated(id), Action::RenderNeeded]
    }

    /// Switch tools. Leaves selection mode and drops any selection or
    /// half-drawn primitive.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
        self.ui.selection_mode = false;
        self.ui.clear_selection();
        self.input = InputState::Idle;
    }

    pub fn toggle_selection_mode(&mut self) {
        self.ui.selection_mode = !self.ui.selection_mode;
        if self.ui.selection_mode {
            if self.input.is_drawing() {
                self.input = InputState::Idle;
            }
        } else {
            self.ui.clear_selection();
        }
    }

    pub fn toggle_grid(&mut self) {
        self.ui.show_grid = !self.ui.show_grid;
    }

    // --- Document edits ---

    /// Remove every stitch. The previous document is snapshotted unless it
    /// was already empty.
    pub fn clear(&mut self) -> Vec<Action> {
        if !self.doc.is_empty() {
            self.history.save_state(&self.doc);
        }
        let removed = self.doc.len();
        self.doc.clear();
        self.input = InputState::Idle;
        self.ui.clear_selection();
        info!(removed, "pattern cleared");
        vec![Action::DocumentCleared, Action::RenderNeeded]
    }

    /// Restore the most recent snapshot. No-op when the history is empty.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(previous) = self.history.undo() else {
            return Vec::new();
        };
        self.doc = previous;
        self.ui.clear_selection();
        if matches!(self.input, InputState::DraggingHandle { .. }) {
            self.input = InputState::Idle;
        }
        info!(stitches = self.doc.len(), remaining = self.history.undo_count(), "undo");
        vec![Action::DocumentRestored, Action::RenderNeeded]
    }

    /// Delete the selected stitch. Returns `Ok(None)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// [`EditError::FillLineNotEditable`] when a single fill line is selected.
    pub fn delete_selected(&mut self) -> Result<Option<StitchId>, EditError> {
        let id = match self.ui.selection {
            Selection::None => return Ok(None),
            Selection::FillLine { .. } => return Err(EditError::FillLineNotEditable),
            Selection::Primitive(id) => id,
        };
        if self.doc.get(&id).is_none() {
            self.ui.clear_selection();
            return Ok(None);
        }
        self.history.save_state(&self.doc);
        self.doc.remove(&id);
        self.ui.clear_selection();
        debug!(%id, "stitch deleted");
        Ok(Some(id))
    }

    /// Delete the active path point of the selected path.
    ///
    /// # Errors
    ///
    /// [`EditError::NoPathPointSelected`] without an active path point, or
    /// [`EditError::PathTooShort`] when the path would drop below two points.
    pub fn delete_path_point(&mut self) -> Result<StitchId, EditError> {
        let (id, index) = self.active_path_point()?;
        let len = self.path_len(id)?;
        if len <= 2 {
            return Err(EditError::PathTooShort { len });
        }

        self.history.save_state(&self.doc);
        if let Some(Shape::Path { points }) = self.doc.get_mut(&id).map(|s| &mut s.shape) {
            points.remove(index);
        }
        self.ui.active_handle = None;
        debug!(%id, index, "path point deleted");
        Ok(id)
    }

    /// Replace the active path point and its successor with their midpoint.
    ///
    /// # Errors
    ///
    /// [`EditError::NoPathPointSelected`] without an active path point,
    /// [`EditError::MergeAtLastPoint`] when the active point has no successor,
    /// or [`EditError::MergeNeedsThreePoints`] for a two-point path.
    pub fn merge_path_points(&mut self) -> Result<StitchId, EditError> {
        let (id, index) = self.active_path_point()?;
        let len = self.path_len(id)?;
        if index + 1 >= len {
            return Err(EditError::MergeAtLastPoint);
        }
        if len <= 2 {
            return Err(EditError::MergeNeedsThreePoints { len });
        }

        self.history.save_state(&self.doc);
        if let Some(Shape::Path { points }) = self.doc.get_mut(&id).map(|s| &mut s.shape) {
            points[index] = points[index].midpoint(points[index + 1]);
            points.remove(index + 1);
        }
        self.ui.active_handle = Some(Handle::PathPoint(index));
        debug!(%id, index, "path points merged");
        Ok(id)
    }

    /// Drop the selection and leave selection mode.
    pub fn escape(&mut self) {
        self.ui.clear_selection();
        self.ui.selection_mode = false;
    }

    fn active_path_point(&self) -> Result<(StitchId, usize), EditError> {
        match (self.ui.selection, self.ui.active_handle) {
            (Selection::Primitive(id), Some(Handle::PathPoint(index))) => Ok((id, index)),
            _ => Err(EditError::NoPathPointSelected),
        }
    }

    fn path_len(&self, id: StitchId) -> Result<usize, EditError> {
        match self.doc.get(&id).map(|s| &s.shape) {
            Some(Shape::Path { points }) => Ok(points.len()),
            _ => Err(EditError::NoPathPointSelected),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.ui.selection
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn stitch(&self, id: &StitchId) -> Option<&Stitch> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<Handle> {
        self.ui.active_handle
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.ui.pointer_screen = Some(screen_pt);

        if button == Button::Middle || self.ui.space_held {
            self.input.begin_pan(screen_pt, self.camera.position());
            return Vec::new();
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let world = self.camera.screen_to_world(screen_pt, self.viewport);
        if self.ui.selection_mode {
            self.select_at(world)
        } else {
            self.draw_press(world)
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        self.ui.pointer_screen = Some(screen_pt);
        let world = self.camera.screen_to_world(screen_pt, self.viewport);

        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { start_screen, start_camera, .. } => {
                self.camera.pan_from(*start_camera, *start_screen, screen_pt);
                vec![Action::RenderNeeded]
            }
            InputState::DrawingPath { raw } => {
                let min_step = self.camera.screen_dist_to_world(PEN_SAMPLE_PX);
                if raw.last().is_none_or(|last| last.distance(world) > min_step) {
                    raw.push(world);
                }
                vec![Action::RenderNeeded]
            }
            InputState::DraggingHandle { id, handle, moved } => {
                if !*moved {
                    self.history.save_state(&self.doc);
                    *moved = true;
                }
                let pos = self.style.snap(world);
                if let Some(stitch) = self.doc.get_mut(id) {
                    stitch.move_handle(*handle, pos);
                }
                vec![Action::RenderNeeded]
            }
            InputState::DrawingShape { .. }
            | InputState::PlacingCurveControl { .. }
            | InputState::DrawingCurve { .. }
            | InputState::PlacingTriangle { .. } => vec![Action::RenderNeeded],
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.ui.pointer_screen = Some(screen_pt);
        if self.input.end_pan() {
            return vec![Action::RenderNeeded];
        }
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt, self.viewport);

        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::RenderNeeded],
            InputState::DrawingPath { raw } => self.commit_path(&raw),
            InputState::DraggingHandle { id, handle, moved } => {
                if !moved {
                    return Vec::new();
                }
                debug!(%id, ?handle, "handle drag finished");
                vec![Action::StitchUpdated(id), Action::RenderNeeded]
            }
            InputState::DrawingShape { tool, anchor } => {
                let end = self.style.snap(world);
                if anchor.distance(end) <= self.camera.screen_dist_to_world(MIN_EXTENT_PX) {
                    return vec![Action::RenderNeeded];
                }
                let Some(stitch) = self.two_point_stitch(tool, anchor, end) else {
                    return vec![Action::RenderNeeded];
                };
                self.commit(stitch)
            }
            InputState::DrawingCurve { anchor, control } => {
                let end = self.style.snap(world);
                let stitch = Stitch::curve(anchor, control, end, self.style.color, self.style.freehand);
                self.commit(stitch)
            }
            state @ (InputState::PlacingCurveControl { .. } | InputState::PlacingTriangle { .. }) => {
                self.input = state;
                Vec::new()
            }
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.camera.zoom_at(screen_pt, factor, self.viewport);
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            self.ui.space_held = true;
            return Vec::new();
        }
        if modifiers.command() {
            return match key.0.as_str() {
                "z" | "Z" => self.undo(),
                _ => Vec::new(),
            };
        }

        match key.0.as_str() {
            "0" => self.camera.reset(),
            "+" | "=" => self.camera.zoom_in(),
            "-" | "_" => self.camera.zoom_out(),
            "g" | "G" => self.toggle_grid(),
            "c" | "C" => return self.clear(),
            "s" | "S" => {
                return vec![Action::SavePatternRequested { file_stem: PATTERN_FILE_STEM.to_owned() }];
            }
            "v" | "V" => self.toggle_selection_mode(),
            "Delete" | "Backspace" => return self.delete_key(),
            "m" | "M" => {
                return match self.merge_path_points() {
                    Ok(id) => vec![Action::StitchUpdated(id), Action::RenderNeeded],
                    Err(EditError::NoPathPointSelected) => Vec::new(),
                    Err(err) => notice(err),
                };
            }
            "Escape" => self.escape(),
            _ => return Vec::new(),
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            self.ui.space_held = false;
            if self.input.end_pan() {
                return vec![Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    // --- Render ---

    /// Draw the current state through `surface`.
    ///
    /// # Errors
    ///
    /// Propagates the first failing surface call.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, &self.doc, &self.camera, &self.style, &self.ui, &self.input)
    }

    // --- Internals ---

    fn select_at(&mut self, world: Point) -> Vec<Action> {
        if let Selection::Primitive(id) = self.ui.selection {
            let handle = self.doc.get(&id).and_then(|s| hit::find_control_point_at(s, world, &self.camera));
            if let Some(handle) = handle {
                self.ui.active_handle = Some(handle);
                self.input = InputState::DraggingHandle { id, handle, moved: false };
                return vec![Action::RenderNeeded];
            }
        }

        self.ui.selection = hit::find_stitch_at(world, &self.doc, &self.camera)
            .map(Selection::from)
            .or_else(|| hit::find_containing_shape(world, &self.doc).map(Selection::Primitive))
            .unwrap_or_default();
        self.ui.active_handle = None;
        vec![Action::RenderNeeded]
    }

    fn draw_press(&mut self, world: Point) -> Vec<Action> {
        let pos = self.style.snap(world);

        match (self.ui.tool, &mut self.input) {
            (Tool::Pen, _) => {
                self.input = InputState::DrawingPath { raw: vec![world] };
            }
            (Tool::FillTriangle, InputState::PlacingTriangle { points }) if points.len() < 2 => {
                points.push(pos);
            }
            (Tool::FillTriangle, InputState::PlacingTriangle { points }) => {
                let tri = [points[0], points[1], pos];
                self.input = InputState::Idle;
                if triangle_area(&tri) == 0.0 {
                    return vec![Action::RenderNeeded];
                }
                let stitch =
                    Stitch::filled_triangle(tri, self.style.grid_size, self.style.color, self.style.freehand);
                return self.commit(stitch);
            }
            (Tool::FillTriangle, _) => {
                self.input = InputState::PlacingTriangle { points: vec![pos] };
            }
            (Tool::Curve, InputState::PlacingCurveControl { anchor }) => {
                self.input = InputState::DrawingCurve { anchor: *anchor, control: pos };
            }
            (Tool::Curve, _) => {
                self.input = InputState::PlacingCurveControl { anchor: pos };
            }
            (tool, _) => {
                self.input = InputState::DrawingShape { tool, anchor: pos };
            }
        }
        vec![Action::RenderNeeded]
    }

    fn two_point_stitch(&self, tool: Tool, anchor: Point, end: Point) -> Option<Stitch> {
        let (color, freehand, spacing) = (self.style.color, self.style.freehand, self.style.grid_size);
        match tool {
            Tool::Line => Some(Stitch::line(anchor, end, color, freehand)),
            Tool::Circle => Some(Stitch::circle(anchor, end, color, freehand)),
            Tool::Box => Some(Stitch::rect(anchor, end, color, freehand)),
            Tool::FillCircle => Some(Stitch::filled_circle(anchor, end, spacing, color, freehand)),
            Tool::FillBox => Some(Stitch::filled_box(anchor, end, spacing, color, freehand)),
            Tool::Curve | Tool::Pen | Tool::FillTriangle => None,
        }
    }

    fn commit_path(&mut self, raw: &[Point]) -> Vec<Action> {
        if raw.len() <= 2 {
            return vec![Action::RenderNeeded];
        }
        let mut points = smooth_path(raw);
        if !self.style.freehand {
            points = snap_points(&points, self.style.grid_size);
        }
        match Stitch::path(points, self.style.color, self.style.freehand) {
            Some(stitch) => self.commit(stitch),
            None => vec![Action::RenderNeeded],
        }
    }

    fn commit(&mut self, stitch: Stitch) -> Vec<Action> {
        self.history.save_state(&self.doc);
        let kind = stitch.shape.kind();
        let id = self.doc.push(stitch);
        debug!(%id, kind, "stitch committed");
        vec![Action::StitchCreated(id), Action::RenderNeeded]
    }

    fn delete_key(&mut self) -> Vec<Action> {
        if matches!(self.ui.active_handle, Some(Handle::PathPoint(_))) {
            return match self.delete_path_point() {
                Ok(id) => vec![Action::StitchUpdated(id), Action::RenderNeeded],
                Err(err) => notice(err),
            };
        }
        match self.delete_selected() {
            Ok(Some(id)) => vec![Action::StitchDeleted(id), Action::RenderNeeded],
            Ok(None) => Vec::new(),
            Err(err) => notice(err),
        }
    }
}

fn notice(err: EditError) -> Vec<Action> {
    warn!(error = %err, "edit rejected");
    vec![Action::Notice(err.to_string())]
}
