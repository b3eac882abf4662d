use crate::engine::config::TrailsConfig;
use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{TrailsError, TrailsResult};
use crate::geometry::outline::Outline;
use crate::render::color::Palette;
use crate::render::line::walk_segment;
use crate::render::surface::Surface;
use crate::source::path::{parse_path_data, subpaths_from_bez};
use crate::source::svg::first_path_in_svg;
use crate::source::text::{FontSource, text_outline};
use crate::trace::builder::{Trace, build_traces};

/// Outline geometry the engine animates along.
#[derive(Clone, Debug)]
pub enum OutlineSource {
    /// SVG path data (`d` attribute syntax).
    PathData(String),
    /// An already parsed path.
    Path(BezPath),
    /// Explicit point loops, one per closed contour.
    Subpaths(Vec<Vec<Point>>),
}

impl OutlineSource {
    fn into_subpaths(self, subdivisions: u32) -> TrailsResult<Vec<Vec<Point>>> {
        let subpaths = match self {
            Self::PathData(d) => subpaths_from_bez(&parse_path_data(&d)?, subdivisions),
            Self::Path(path) => subpaths_from_bez(&path, subdivisions),
            Self::Subpaths(subpaths) => subpaths,
        };
        let subpaths: Vec<Vec<Point>> = subpaths.into_iter().filter(|sp| !sp.is_empty()).collect();
        if subpaths.is_empty() {
            return Err(TrailsError::missing_input("outline contains no points"));
        }
        Ok(subpaths)
    }
}

/// The trails renderer/animator.
///
/// Owns a drawing surface, fits the outline into it and advances every trace by one tick per
/// [`Trails::update`] call, redrawing only the short segments that make up each tail.
///
/// The engine is single-threaded and frame driven: the embedder calls `update()` once per
/// frame and `resize()` whenever the surface changes size. Calls on one instance must be
/// serialized; separate instances share nothing.
pub struct Trails<S: Surface> {
    surface: S,
    config: TrailsConfig,
    palette: Palette,
    source: Option<Vec<Vec<Point>>>,
    fitted: Option<Outline>,
    outline: Option<Outline>,
    traces: Vec<Trace>,
    logical: (f64, f64),
    dpr: f64,
}

impl<S: Surface> std::fmt::Debug for Trails<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trails")
            .field("config", &self.config)
            .field("traces", &self.traces.len())
            .field("logical", &self.logical)
            .field("dpr", &self.dpr)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

impl<S: Surface> Trails<S> {
    /// Build an engine over `surface` and size it to the surface's current dimensions.
    pub fn new(source: OutlineSource, surface: S, config: TrailsConfig) -> TrailsResult<Self> {
        let config = config.validated()?;
        let subpaths = source.into_subpaths(config.subdivisions)?;
        tracing::debug!(subpaths = subpaths.len(), "extracted outline");

        let mut engine = Self {
            surface,
            palette: Palette::new(&config.color),
            config,
            source: Some(subpaths),
            fitted: None,
            outline: None,
            traces: Vec::new(),
            logical: (0.0, 0.0),
            dpr: 1.0,
        };
        engine.resize()?;
        Ok(engine)
    }

    /// Build an engine from the first path of an SVG document.
    ///
    /// Unlike a browser host, nothing here observes window size changes: call
    /// [`Trails::resize`] after changing the surface size.
    pub fn from_svg(svg: &str, surface: S, config: TrailsConfig) -> TrailsResult<Self> {
        let path = first_path_in_svg(svg)?;
        Self::new(OutlineSource::Path(path), surface, config)
    }

    /// Build an engine from the glyph outlines of `text` set in `font`.
    ///
    /// Font loading failures surface as [`TrailsError::FontLoad`] before any engine exists.
    pub fn from_text(
        text: &str,
        font: &FontSource,
        surface: S,
        config: TrailsConfig,
    ) -> TrailsResult<Self> {
        let path = text_outline(text, font)?;
        Self::new(OutlineSource::Path(path), surface, config)
    }

    /// Replace the color generator, e.g. with a seeded one for reproducible frames.
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.palette.set_rng(rng);
        self
    }

    /// Shorthand for [`Trails::with_rng`] with `fastrand::Rng::with_seed(seed)`.
    pub fn with_rng_seed(self, seed: u64) -> Self {
        self.with_rng(fastrand::Rng::with_seed(seed))
    }

    /// Swap in a new configuration and rebuild everything with a full [`Trails::resize`].
    pub fn reload(mut self, config: TrailsConfig) -> TrailsResult<Self> {
        if self.is_destroyed() {
            return Err(TrailsError::Destroyed);
        }
        let config = config.validated()?;
        self.palette.set_spec(&config.color);
        self.config = config;
        self.resize()?;
        Ok(self)
    }

    /// Re-read the surface size and device pixel ratio, refit the outline and recenter.
    ///
    /// The outline is always refit from the originally extracted points, so repeated resizes
    /// do not accumulate truncation error.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self) -> TrailsResult<()> {
        let source = self.source.as_ref().ok_or(TrailsError::Destroyed)?;
        let (width, height) = self.surface.logical_size();
        let dpr = self.surface.device_pixel_ratio();

        let mut fitted = Outline::new(source.iter().map(|sp| sp.iter().copied()));
        fitted.scale(self.config.scale);
        fitted.resize(
            width * self.config.image_width,
            height * self.config.image_height,
        )?;
        tracing::debug!(w = fitted.dim().w, h = fitted.dim().h, "fitted outline");

        self.surface
            .set_backing_size(backing_px(width, dpr), backing_px(height, dpr));
        self.logical = (width, height);
        self.dpr = dpr;
        self.fitted = Some(fitted);
        self.position_to_center()
    }

    /// Scale the fitted outline to device pixels, center it on the surface and rebuild the
    /// traces. Animation state (cursors, tails) starts over.
    #[tracing::instrument(skip(self))]
    pub fn position_to_center(&mut self) -> TrailsResult<()> {
        let fitted = self.fitted.as_ref().ok_or(TrailsError::Destroyed)?;
        let (width, height) = self.logical;
        let dpr = self.dpr;

        let mut outline = fitted.clone();
        if dpr != 1.0 {
            outline.scale(dpr);
        }
        let dim = outline.dim();
        outline.translate(
            width * dpr / 2.0 - dim.w as f64 / 2.0,
            height * dpr / 2.0 - dim.h as f64 / 2.0,
        );

        self.traces = build_traces(
            outline.subpaths(),
            self.config.step_factor / dpr,
            self.config.speed,
        );
        tracing::debug!(
            traces = self.traces.len(),
            min_x = outline.min().x,
            min_y = outline.min().y,
            "rebuilt traces"
        );
        self.outline = Some(outline);
        Ok(())
    }

    /// Advance every trace by one tick and redraw its tail.
    ///
    /// Calling this after [`Trails::destroy`] is a no-op.
    pub fn update(&mut self) {
        if self.is_destroyed() {
            tracing::warn!("update() called on a destroyed engine; ignoring");
            return;
        }

        let stride = self.config.stride();
        for trace in &mut self.traces {
            let vector = trace.advance(stride);
            trace.record(vector);
            draw_tail(trace, &mut self.palette, &mut self.surface);
            trace.set_last_drawn(vector);
        }
    }

    /// Clear the surface and release the outline and traces. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        let (w, h) = self.surface.backing_size();
        self.surface.clear_rect(0, 0, w, h);
        self.traces.clear();
        self.outline = None;
        self.fitted = None;
        self.source = None;
    }

    /// `true` once [`Trails::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.source.is_none()
    }

    /// Active traces.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Centered outline in device pixels, if not destroyed.
    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    /// Current configuration.
    pub fn config(&self) -> &TrailsConfig {
        &self.config
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface, e.g. to change its size before a resize.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Erase and redraw every tail segment of `trace`, newest first, fading toward the tail end.
fn draw_tail<S: Surface>(trace: &Trace, palette: &mut Palette, surface: &mut S) {
    let count = trace.tails().len();
    for (i, tail) in trace.tails().iter_newest_first().enumerate() {
        let opacity = tail_opacity(i, count);
        let color = palette.pick().with_opacity(opacity).to_rgba8_premul();
        walk_segment(tail.at, tail.from, |x, y| surface.clear_pixel(x, y));
        walk_segment(tail.at, tail.from, |x, y| surface.fill_pixel(x, y, color));
    }
}

/// Opacity of the `i`-th newest of `count` tail segments, never below one half.
pub fn tail_opacity(i: usize, count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    (1.0 - i as f64 / count as f64).max(0.5)
}

fn backing_px(logical: f64, dpr: f64) -> u32 {
    let px = logical * dpr;
    if px.is_finite() && px > 0.0 {
        px.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/trails.rs"]
mod tests;
