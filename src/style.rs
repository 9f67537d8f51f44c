//! Stitch-style configuration.
//!
//! [`StitchStyle`] holds the values the UI panel edits: color, manual stitch
//! length and gap ratio, grid size, the freehand toggle, and the authentic
//! sashiko settings. Dash generation never reads the raw fields directly; it
//! asks for [`StitchStyle::dash_spec`], which resolves manual vs. authentic
//! mode at read time. Already drawn stitches are therefore re-dashed with
//! whatever mode is active when the frame is rendered.
//!
//! Hosts may hand over a partial JSON object ([`StitchStyle::from_json`]);
//! missing fields take their defaults and every value is validated.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    AUTHENTIC_BACK_RATIO, AUTHENTIC_DENSITY_PER_CM, AUTHENTIC_GAP_RATIO, AUTHENTIC_STITCH_MM, DEFAULT_GAP_RATIO,
    MM_TO_PX, WORLD_GRID_SIZE, WORLD_STITCH_LENGTH,
};
use crate::doc::Color;
use crate::geom::Point;

/// Largest accepted gap ratio.
const MAX_GAP_RATIO: f64 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid style json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stitch length must be a positive number, got {0}")]
    InvalidStitchLength(f64),
    #[error("gap ratio must be in (0, 2], got {0}")]
    InvalidGapRatio(f64),
    #[error("grid size must be a positive number, got {0}")]
    InvalidGridSize(f64),
    #[error("authentic stitch length must be a positive number of millimeters, got {0}")]
    InvalidAuthenticLength(f64),
    #[error("stitch density must be a positive number per centimeter, got {0}")]
    InvalidDensity(f64),
}

/// Manual gap ratio choice.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapRatio {
    /// Gap is a third of the stitch.
    OneThird,
    /// Gap is half the stitch.
    #[default]
    OneHalf,
    Custom(f64),
}

impl GapRatio {
    /// The ratio as a fraction of the stitch length.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::OneThird => 0.33,
            Self::OneHalf => DEFAULT_GAP_RATIO,
            Self::Custom(v) => v,
        }
    }
}

/// Authentic sashiko mode: dash lengths derived from physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticSettings {
    pub enabled: bool,
    /// Front stitch length in millimeters.
    pub stitch_length_mm: f64,
    /// Stitch density. Informational; dash lengths come from `stitch_length_mm`.
    pub stitches_per_cm: f64,
}

impl Default for AuthenticSettings {
    fn default() -> Self {
        Self { enabled: false, stitch_length_mm: AUTHENTIC_STITCH_MM, stitches_per_cm: AUTHENTIC_DENSITY_PER_CM }
    }
}

impl AuthenticSettings {
    #[must_use]
    pub fn metrics(&self) -> AuthenticMetrics {
        let front_px = self.stitch_length_mm * MM_TO_PX;
        AuthenticMetrics {
            front_px,
            back_px: front_px * AUTHENTIC_BACK_RATIO,
            gap_px: front_px * AUTHENTIC_GAP_RATIO,
        }
    }
}

/// Pixel lengths derived from the authentic millimeter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthenticMetrics {
    /// Visible stitch on the front of the cloth.
    pub front_px: f64,
    /// Hidden stitch on the back. Not used for dashing.
    pub back_px: f64,
    pub gap_px: f64,
}

impl AuthenticMetrics {
    /// Front-to-back ratio; 1.5 for the traditional 3:2 proportion.
    #[must_use]
    pub fn front_to_back(&self) -> f64 {
        self.front_px / self.back_px
    }
}

/// Resolved dash and gap lengths in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashSpec {
    pub dash: f64,
    pub gap: f64,
}

impl DashSpec {
    #[must_use]
    pub fn new(dash: f64, gap: f64) -> Self {
        Self { dash, gap }
    }

    /// Length of one dash plus one gap.
    #[must_use]
    pub fn period(&self) -> f64 {
        self.dash + self.gap
    }

    /// Whether the pattern can be walked without stalling.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.dash.is_finite() && self.gap.is_finite() && self.dash > 0.0 && self.gap >= 0.0
    }
}

/// Process-wide stitch configuration owned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchStyle {
    pub color: Color,
    /// Manual stitch length in world units.
    pub stitch_length: f64,
    pub gap_ratio: GapRatio,
    /// Grid spacing in world units; also the fill spacing for new filled shapes.
    pub grid_size: f64,
    /// When off, new points snap to the grid.
    pub freehand: bool,
    pub authentic: AuthenticSettings,
}

impl Default for StitchStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            stitch_length: WORLD_STITCH_LENGTH,
            gap_ratio: GapRatio::default(),
            grid_size: WORLD_GRID_SIZE,
            freehand: true,
            authentic: AuthenticSettings::default(),
        }
    }
}

impl StitchStyle {
    /// Parse a (possibly partial) JSON style and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the specific
    /// validation error for the first out-of-range value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Check every numeric field.
    ///
    /// # Errors
    ///
    /// Returns the first field that is non-finite or out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive(self.stitch_length, ConfigError::InvalidStitchLength)?;
        check_gap_ratio(self.gap_ratio)?;
        check_positive(self.grid_size, ConfigError::InvalidGridSize)?;
        check_positive(self.authentic.stitch_length_mm, ConfigError::InvalidAuthenticLength)?;
        check_positive(self.authentic.stitches_per_cm, ConfigError::InvalidDensity)?;
        Ok(())
    }

    // --- Setters ---

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidStitchLength`] for non-positive or non-finite input.
    pub fn set_stitch_length(&mut self, px: f64) -> Result<(), ConfigError> {
        check_positive(px, ConfigError::InvalidStitchLength)?;
        self.stitch_length = px;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidGapRatio`] when a custom ratio is outside `(0, 2]`.
    pub fn set_gap_ratio(&mut self, ratio: GapRatio) -> Result<(), ConfigError> {
        check_gap_ratio(ratio)?;
        self.gap_ratio = ratio;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidGridSize`] for non-positive or non-finite input.
    pub fn set_grid_size(&mut self, px: f64) -> Result<(), ConfigError> {
        check_positive(px, ConfigError::InvalidGridSize)?;
        self.grid_size = px;
        Ok(())
    }

    pub fn set_freehand(&mut self, freehand: bool) {
        self.freehand = freehand;
    }

    pub fn set_authentic_enabled(&mut self, enabled: bool) {
        self.authentic.enabled = enabled;
        self.log_authentic();
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidAuthenticLength`] for non-positive or non-finite input.
    pub fn set_authentic_length_mm(&mut self, mm: f64) -> Result<(), ConfigError> {
        check_positive(mm, ConfigError::InvalidAuthenticLength)?;
        self.authentic.stitch_length_mm = mm;
        self.log_authentic();
        Ok(())
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidDensity`] for non-positive or non-finite input.
    pub fn set_authentic_density(&mut self, per_cm: f64) -> Result<(), ConfigError> {
        check_positive(per_cm, ConfigError::InvalidDensity)?;
        self.authentic.stitches_per_cm = per_cm;
        self.log_authentic();
        Ok(())
    }

    // --- Resolved values ---

    /// Dash length for the active mode.
    #[must_use]
    pub fn active_stitch_length(&self) -> f64 {
        if self.authentic.enabled {
            self.authentic.metrics().front_px
        } else {
            self.stitch_length
        }
    }

    /// Gap ratio for the active mode.
    #[must_use]
    pub fn active_gap_ratio(&self) -> f64 {
        if self.authentic.enabled {
            AUTHENTIC_GAP_RATIO
        } else {
            self.gap_ratio.value()
        }
    }

    /// Dash and gap lengths for the active mode.
    #[must_use]
    pub fn dash_spec(&self) -> DashSpec {
        let dash = self.active_stitch_length();
        DashSpec::new(dash, dash * self.active_gap_ratio())
    }

    /// Snap a new point to the grid unless freehand mode is on.
    #[must_use]
    pub fn snap(&self, p: Point) -> Point {
        if self.freehand {
            p
        } else {
            snap_to_grid(p, self.grid_size)
        }
    }

    fn log_authentic(&self) {
        if !self.authentic.enabled {
            return;
        }
        let m = self.authentic.metrics();
        debug!(
            stitch_mm = self.authentic.stitch_length_mm,
            front_px = m.front_px,
            back_px = m.back_px,
            gap_px = m.gap_px,
            ratio = m.front_to_back(),
            density_per_cm = self.authentic.stitches_per_cm,
            "authentic sashiko parameters updated"
        );
    }
}

/// Round each coordinate to the nearest grid multiple; halves round up.
///
/// A non-positive grid leaves the point unchanged.
#[must_use]
pub fn snap_to_grid(p: Point, grid: f64) -> Point {
    if !(grid > 0.0 && grid.is_finite()) {
        return p;
    }
    Point::new((p.x / grid + 0.5).floor() * grid, (p.y / grid + 0.5).floor() * grid)
}

fn check_positive(value: f64, err: fn(f64) -> ConfigError) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(err(value))
    }
}

fn check_gap_ratio(ratio: GapRatio) -> Result<(), ConfigError> {
    let v = ratio.value();
    if v.is_finite() && v > 0.0 && v <= MAX_GAP_RATIO {
        Ok(())
    } else {
        Err(ConfigError::InvalidGapRatio(v))
    }
}
