use crate::foundation::core::Vector;
use crate::trace::tail::{TailEntry, TailRing};

/// Smallest tail capacity handed to any trace.
pub const MIN_TAIL_LEN: usize = 10;

/// Most samples a single segment may contribute; longer segments are skipped.
pub const MAX_SEGMENT_STEPS: usize = 1 << 20;

/// A densified subpath plus the animation state of the marker walking it.
#[derive(Clone, Debug)]
pub struct Trace {
    coords: Vec<Vector>,
    index: usize,
    tails: TailRing,
    last: Option<Vector>,
}

impl Trace {
    /// Wrap an already densified coordinate list. Returns `None` for an empty list.
    pub fn new(coords: Vec<Vector>, speed: f64) -> Option<Self> {
        if coords.is_empty() {
            return None;
        }
        let tails = TailRing::with_capacity(tail_capacity(coords.len(), speed));
        Some(Self {
            coords,
            index: 0,
            tails,
            last: None,
        })
    }

    /// Evenly stepped sample positions along the loop.
    pub fn coords(&self) -> &[Vector] {
        &self.coords
    }

    /// Cursor into [`Trace::coords`] for the next tick.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Recent marker positions, newest first.
    pub fn tails(&self) -> &TailRing {
        &self.tails
    }

    /// Position the marker was drawn at on the previous tick.
    pub fn last_drawn(&self) -> Option<Vector> {
        self.last
    }

    /// Read the sample under the cursor, then move the cursor `stride` samples forward.
    ///
    /// The cursor returns to 0 once it reaches `coords.len() - 1`, so the final sample of the
    /// loop is never read; it coincides with the first sample of the next lap.
    pub(crate) fn advance(&mut self, stride: usize) -> Vector {
        let vector = self.coords[self.index];
        self.index = self.index.saturating_add(stride);
        if self.index >= self.coords.len() - 1 {
            self.index = 0;
        }
        vector
    }

    /// Record `at` as the newest tail entry, drawn from the previous position.
    pub(crate) fn record(&mut self, at: Vector) {
        self.tails.push(TailEntry {
            at,
            from: self.last,
        });
    }

    pub(crate) fn set_last_drawn(&mut self, at: Vector) {
        self.last = Some(at);
    }
}

/// Tail capacity for a trace of `len` samples moving `speed` samples per tick.
pub fn tail_capacity(len: usize, speed: f64) -> usize {
    let per_lap = if speed.is_finite() && speed > 0.0 {
        (len as f64 / speed).floor() as usize
    } else {
        len
    };
    per_lap.max(MIN_TAIL_LEN)
}

/// Number of samples a segment of extent `(dx, dy)` contributes.
///
/// Zero when the step factor is unusable or the count would exceed [`MAX_SEGMENT_STEPS`].
pub fn segment_steps(dx: i64, dy: i64, step_factor: f64) -> usize {
    if !step_factor.is_finite() || step_factor <= 0.0 {
        return 0;
    }
    let extent = dx.unsigned_abs().max(dy.unsigned_abs()) as f64;
    let steps = (step_factor * extent).floor();
    if steps > MAX_SEGMENT_STEPS as f64 {
        tracing::warn!(dx, dy, step_factor, "segment needs too many samples; skipping");
        return 0;
    }
    steps as usize
}

/// Walk the closed loop `points` and emit evenly stepped integer samples.
///
/// Each segment `p[i] -> p[i + 1]` (with `p[n] = p[0]`) contributes
/// `floor(step_factor * max(|dx|, |dy|))` samples, excluding its start point and ending on its
/// end point. Zero-step segments contribute nothing.
pub fn densify(points: &[Vector], step_factor: f64) -> Vec<Vector> {
    let mut coords = Vec::new();
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        let (dx, dy) = (next.x.saturating_sub(p.x), next.y.saturating_sub(p.y));
        let steps = segment_steps(dx, dy, step_factor);
        if steps == 0 {
            tracing::trace!(?p, ?next, "skipping degenerate segment");
            continue;
        }

        let ix = dx as f64 / steps as f64;
        let iy = dy as f64 / steps as f64;
        let (mut x, mut y) = (p.x as f64, p.y as f64);
        coords.reserve(steps);
        for _ in 0..steps {
            x += ix;
            y += iy;
            coords.push(Vector::truncate(x, y));
        }
    }
    coords
}

/// Turn every subpath into a [`Trace`], dropping subpaths that yield no samples.
pub fn build_traces(subpaths: &[Vec<Vector>], step_factor: f64, speed: f64) -> Vec<Trace> {
    let traces: Vec<Trace> = subpaths
        .iter()
        .filter_map(|points| Trace::new(densify(points, step_factor), speed))
        .collect();

    let dropped = subpaths.len() - traces.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped subpaths without samples");
    }
    traces
}

#[cfg(test)]
#[path = "../../tests/unit/trace/builder.rs"]
mod tests;
