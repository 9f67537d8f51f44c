//! Shared numeric constants for the sashiko crate.

// ── World ───────────────────────────────────────────────────────

/// Spacing of the world grid, in world units.
pub const WORLD_GRID_SIZE: f64 = 20.0;

/// Default manual stitch (dash) length, in world units.
pub const WORLD_STITCH_LENGTH: f64 = 10.0;

/// Default manual gap ratio (gap = stitch length × ratio).
pub const DEFAULT_GAP_RATIO: f64 = 0.5;

// ── Authentic sashiko ───────────────────────────────────────────

/// Pixels per millimeter at 96 DPI.
pub const MM_TO_PX: f64 = 3.78;

/// Default front stitch length in millimeters.
pub const AUTHENTIC_STITCH_MM: f64 = 3.5;

/// Back stitch = front × 2/3, giving the traditional 3:2 ratio.
pub const AUTHENTIC_BACK_RATIO: f64 = 2.0 / 3.0;

/// Gap = front × 1/3.
pub const AUTHENTIC_GAP_RATIO: f64 = 1.0 / 3.0;

/// Default density in stitches per centimeter.
pub const AUTHENTIC_DENSITY_PER_CM: f64 = 2.5;

// ── Camera ──────────────────────────────────────────────────────

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplier applied by the zoom-in / zoom-out commands.
pub const ZOOM_STEP: f64 = 1.2;

/// Wheel zoom factor when scrolling down (positive delta).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Wheel zoom factor when scrolling up.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

// ── Hit-testing and gestures (screen pixels) ────────────────────

/// Slop for stroke and fill-line hits.
pub const HIT_THRESHOLD_PX: f64 = 10.0;

/// Slop for control-point handles.
pub const HANDLE_THRESHOLD_PX: f64 = 15.0;

/// Primitives whose defining points are closer than this are discarded.
pub const MIN_EXTENT_PX: f64 = 5.0;

/// Pen samples closer than this to the previous sample are dropped.
pub const PEN_SAMPLE_PX: f64 = 3.0;

// ── Sampling ────────────────────────────────────────────────────

/// Uniform parameter steps used to dash a quadratic curve.
pub const CURVE_DASH_SAMPLES: usize = 50;

/// Chords used to approximate a curve during hit-testing.
pub const CURVE_HIT_CHORDS: usize = 20;

/// Target micro-step length when dashing a polyline.
pub const PATH_MICRO_STEP: f64 = 2.0;

// ── Pen smoothing ───────────────────────────────────────────────

pub const SIMPLIFY_TOLERANCE: f64 = 5.0;
pub const CHAIKIN_ITERATIONS: usize = 2;

// ── Fill ────────────────────────────────────────────────────────

/// Fill rows are spaced at this multiple of the fill spacing.
pub const FILL_SPACING_MULTIPLIER: f64 = 2.0;

/// Clip points closer than this are treated as one.
pub const DEDUP_TOLERANCE: f64 = 0.1;

/// Line pairs with a cross-product denominator below this are parallel.
pub const PARALLEL_EPSILON: f64 = 0.001;

// ── History ─────────────────────────────────────────────────────

pub const MAX_UNDO: usize = 50;

// ── Rendering (world units, scaled by zoom) ─────────────────────

pub const STITCH_WEIGHT: f64 = 3.0;
pub const HIGHLIGHT_WEIGHT: f64 = 6.0;
pub const TRIANGLE_GUIDE_WEIGHT: f64 = 2.0;
pub const HANDLE_DIAMETER: f64 = 10.0;
pub const ACTIVE_HANDLE_DIAMETER: f64 = 14.0;
pub const GRID_DOT_DIAMETER: f64 = 3.0;

/// Alpha used for in-progress previews.
pub const PREVIEW_ALPHA: u8 = 100;

/// Grid dots are skipped when grid cells are smaller than this on screen.
pub const GRID_DOT_MIN_SPACING_PX: f64 = 4.0;
