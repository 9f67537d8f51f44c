//! Browser host: a [`Surface`] over a canvas 2D context and the [`Engine`]
//! wrapper that binds an `HtmlCanvasElement` to an [`EngineCore`].
//!
//! This is the only module that touches `web_sys`. Everything it does is
//! delegation; the editing logic lives in [`crate::engine`].

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Viewport};
use crate::doc::{Color, Stitch, StitchId};
use crate::engine::{Action, EngineCore};
use crate::hit::Handle;
use crate::input::{Button, Key, Modifiers, Selection, Tool, WheelDelta};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::style::{ConfigError, StitchStyle};

const FONT_FAMILY: &str = "sans-serif";

/// [`Surface`] backed by a browser canvas context. Coordinates are CSS pixels;
/// the caller sets the device-pixel-ratio transform beforehand.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport) -> Self {
        Self { ctx, viewport }
    }

    fn arc(&self, center: Point, diameter: f64) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, diameter * 0.5, 0.0, TAU)
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, color: Color) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        Ok(())
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn set_fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn line(&mut self, a: Point, b: Point) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.move_to(a.x, a.y);
        self.ctx.line_to(b.x, b.y);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, diameter: f64) -> Result<(), JsValue> {
        self.arc(center, diameter)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, diameter: f64) -> Result<(), JsValue> {
        self.arc(center, diameter)?;
        self.ctx.stroke();
        Ok(())
    }

    fn stroke_rect(&mut self, min: Point, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.stroke_rect(min.x, min.y, width, height);
        Ok(())
    }

    fn polyline(&mut self, points: &[Point], closed: bool) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        if closed {
            self.ctx.close_path();
        }
        self.ctx.stroke();
        Ok(())
    }

    fn text(
        &mut self,
        text: &str,
        at: Point,
        size: f64,
        align: TextAlign,
        baseline: TextBaseline,
    ) -> Result<(), JsValue> {
        self.ctx.set_font(&format!("{size}px {FONT_FAMILY}"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline(match baseline {
            TextBaseline::Top => "top",
            TextBaseline::Bottom => "bottom",
        });
        self.ctx.fill_text(text, at.x, at.y)
    }
}

/// Browser-facing engine: an [`EngineCore`] bound to its canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, dpr: 1.0, core: EngineCore::new() }
    }

    // --- Configuration ---

    /// Replace the stitch style from a (possibly partial) JSON object.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error; the current style is kept.
    pub fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        let style = StitchStyle::from_json(json)?;
        self.core.set_style(style)
    }

    /// Switch tools by the host's name for them (e.g. `"fillCircle"`).
    /// Returns `false` for an unknown name.
    pub fn set_tool_name(&mut self, name: &str) -> bool {
        let Some(tool) = Tool::from_name(name) else {
            return false;
        };
        self.core.set_tool(tool);
        true
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_color(&mut self, color: Color) -> Vec<Action> {
        self.core.set_color(color)
    }

    pub fn toggle_selection_mode(&mut self) {
        self.core.toggle_selection_mode();
    }

    pub fn clear(&mut self) -> Vec<Action> {
        self.core.clear()
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.core.set_viewport(width_css, height_css);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        let mut surface = CanvasSurface::new(ctx, self.core.viewport);
        self.core.render(&mut surface)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.core.selection()
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<Handle> {
        self.core.active_handle()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn stitch(&self, id: &StitchId) -> Option<&Stitch> {
        self.core.stitch(id)
    }
}
