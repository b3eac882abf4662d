//! Trails draws markers that travel along a vector outline, each followed by a fading tail.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: path data, an SVG document or a line of text becomes one point loop per
//!    closed contour ([`OutlineSource`], [`subpaths_from_bez`], [`first_path_in_svg`],
//!    [`text_outline`]).
//! 2. **Fit**: the loops become an integer [`Outline`], scaled, fitted to a fraction of the
//!    surface and centered in device pixels.
//! 3. **Trace**: every loop is densified into evenly stepped samples ([`build_traces`]) and
//!    given a bounded tail history ([`TailRing`]).
//! 4. **Animate**: each [`Trails::update`] advances every trace and incrementally erases and
//!    redraws its tail segments on a [`Surface`] with a Bresenham walk ([`walk_line`]).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic geometry**: every transform truncates toward zero, and the only random
//!   input (palette picks) comes from an injectable seeded generator.
//! - **Single-threaded, frame driven**: the embedder calls `update()` once per frame; the
//!   engine spawns nothing.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod foundation;
mod geometry;
mod render;
mod source;
mod trace;

pub use engine::config::{MAX_SPEED, MAX_STEP_FACTOR, TrailsConfig, parse_options};
pub use engine::trails::{OutlineSource, Trails, tail_opacity};
pub use foundation::core::{BezPath, Bounds, Dim, Point, Rgba8Premul, Vector};
pub use foundation::error::{TrailsError, TrailsResult};
pub use geometry::outline::Outline;
pub use render::color::{Color, ColorSpec, Palette};
pub use render::line::{walk_line, walk_segment};
pub use render::surface::{PixmapSurface, Surface};
pub use source::path::{DEFAULT_SUBDIVISIONS, parse_path_data, subpaths_from_bez};
pub use source::svg::first_path_in_svg;
pub use source::text::{FontSource, TEXT_FONT_SIZE, text_outline};
pub use trace::builder::{
    MAX_SEGMENT_STEPS, MIN_TAIL_LEN, Trace, build_traces, densify, segment_steps, tail_capacity,
};
pub use trace::tail::{TailEntry, TailRing};
