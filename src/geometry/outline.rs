use crate::foundation::core::{Bounds, Dim, Point, Vector};
use crate::foundation::error::{TrailsError, TrailsResult};

/// One or more closed point loops plus their exact bounding box.
///
/// Points are integral: ingestion and every transform truncate toward zero. The point count is
/// fixed at construction; only [`Outline::translate`], [`Outline::scale_xy`] and
/// [`Outline::resize`] rewrite point values, and each of them rebuilds the bounding box in the
/// same pass, so `min`/`max`/`dim` always describe the current points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outline {
    subpaths: Vec<Vec<Vector>>,
    bounds: Bounds,
}

impl Outline {
    /// Build from floating-point subpaths, truncating every coordinate.
    pub fn new<I, P>(subpaths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = Point>,
    {
        Self::from_vectors(
            subpaths
                .into_iter()
                .map(|sp| sp.into_iter().map(Vector::from).collect())
                .collect(),
        )
    }

    /// Build from integer subpaths.
    pub fn from_vectors(subpaths: Vec<Vec<Vector>>) -> Self {
        let bounds = Bounds::containing(subpaths.iter().flatten().copied());
        Self { subpaths, bounds }
    }

    /// Current point loops.
    pub fn subpaths(&self) -> &[Vec<Vector>] {
        &self.subpaths
    }

    /// Total number of points across all subpaths.
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// Minimum bounding corner.
    pub fn min(&self) -> Vector {
        self.bounds.min()
    }

    /// Maximum bounding corner.
    pub fn max(&self) -> Vector {
        self.bounds.max()
    }

    /// Bounding extents.
    pub fn dim(&self) -> Dim {
        self.bounds.dim()
    }

    /// Shift every point so the minimum corner lands at `(x, y)`.
    pub fn translate(&mut self, x: f64, y: f64) {
        let min = self.bounds.min();
        let (min_x, min_y) = (min.x as f64, min.y as f64);
        self.rewrite(|v| Vector::truncate(v.x as f64 - min_x + x, v.y as f64 - min_y + y));
    }

    /// Multiply every coordinate by `s`.
    pub fn scale(&mut self, s: f64) {
        self.scale_xy(s, s);
    }

    /// Multiply x coordinates by `sx` and y coordinates by `sy`.
    pub fn scale_xy(&mut self, sx: f64, sy: f64) {
        self.rewrite(|v| Vector::truncate(v.x as f64 * sx, v.y as f64 * sy));
    }

    /// Fit the geometry to a target width and/or height.
    ///
    /// A zero, negative or non-finite target counts as "not supplied". When only one target is
    /// usable, its ratio is applied to both axes, preserving the aspect ratio. Scaling is about
    /// the origin, so callers normally [`Outline::translate`] afterwards.
    pub fn resize(&mut self, w: f64, h: f64) -> TrailsResult<()> {
        fn supplied(v: f64) -> Option<f64> {
            (v.is_finite() && v > 0.0).then_some(v)
        }

        let (w, h) = (supplied(w), supplied(h));
        if w.is_none() && h.is_none() {
            return Err(TrailsError::invalid_resize(
                "at least one of width or height must be non-zero",
            ));
        }

        let dim = self.dim();
        let wratio = w.filter(|_| dim.w > 0).map(|w| w / dim.w as f64);
        let hratio = h.filter(|_| dim.h > 0).map(|h| h / dim.h as f64);

        let (wratio, hratio) = match (wratio, hratio) {
            (Some(wr), Some(hr)) => (wr, hr),
            (Some(wr), None) => (wr, wr),
            (None, Some(hr)) => (hr, hr),
            (None, None) => {
                return Err(TrailsError::invalid_resize(format!(
                    "geometry has zero extent along every requested axis ({}x{})",
                    dim.w, dim.h
                )));
            }
        };

        self.scale_xy(wratio, hratio);
        Ok(())
    }

    /// Single pass that replaces every point and rebuilds the bounds from scratch.
    ///
    /// Anything the mapping needs from the previous bounds must be captured before calling.
    fn rewrite(&mut self, f: impl Fn(Vector) -> Vector) {
        let mut bounds = Bounds::empty();
        for subpath in &mut self.subpaths {
            for v in subpath.iter_mut() {
                let next = f(*v);
                bounds.include(next);
                *v = next;
            }
        }
        self.bounds = bounds;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/outline.rs"]
mod tests;
