//! Geometry and input engine for the sashiko pattern designer.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but every
//! piece of stitch logic is plain Rust that can be exercised natively. It owns
//! the full lifecycle of a pattern: translating raw pointer and keyboard events
//! into document mutations, maintaining camera state for pan/zoom, breaking each
//! primitive into running-stitch dashes, hit-testing stitches and their control
//! points, and drawing the frame through a [`render::Surface`]. The host
//! JavaScript layer only wires DOM events to the engine and reacts to the
//! returned [`engine::Action`]s (notices, save requests).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] and its event handlers |
//! | [`doc`] | Stitch primitives, colors, and the ordered document |
//! | [`camera`] | Pan/zoom camera and world/screen conversions |
//! | [`geom`] | Points, segments, distances, intersections, Bezier evaluation |
//! | [`style`] | Stitch-style configuration, authentic mode, grid snapping |
//! | [`dash`] | Running-stitch dash generation per primitive |
//! | [`fill`] | Cross-hatch fill lines for filled shapes |
//! | [`simplify`] | Douglas-Peucker and Chaikin smoothing for pen strokes |
//! | [`hit`] | Hit-testing against stitches, fill lines, and handles |
//! | [`history`] | Bounded undo stack of document snapshots |
//! | [`input`] | Tools, input event types, and the gesture state machine |
//! | [`render`] | Drawing-surface trait and frame renderer |
//! | [`web`] | Browser canvas surface and the wasm-facing [`web::Engine`] |
//! | [`consts`] | Shared numeric constants (grid, thresholds, zoom limits) |

pub mod camera;
pub mod consts;
pub mod dash;
pub mod doc;
pub mod engine;
pub mod fill;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod simplify;
pub mod style;
pub mod web;
