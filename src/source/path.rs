use kurbo::{CubicBez, ParamCurve, PathEl, QuadBez};

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{TrailsError, TrailsResult};

/// Curve samples per quadratic/cubic segment when none is configured.
pub const DEFAULT_SUBDIVISIONS: u32 = 16;

/// Parse SVG path data (`d` attribute syntax).
pub fn parse_path_data(d: &str) -> TrailsResult<BezPath> {
    let d = d.trim();
    if d.is_empty() {
        return Err(TrailsError::missing_input("path data must be non-empty"));
    }

    BezPath::from_svg(d).map_err(|e| TrailsError::parse(format!("invalid path data: {e}")))
}

/// Split a path into closed contours and sample each into an ordered point loop.
///
/// A contour starts at every `MoveTo` and ends at the next `ClosePath` or `MoveTo`; unclosed
/// contours are treated as closed. Lines contribute their end point and curves contribute
/// `subdivisions` evenly spaced parameter samples.
pub fn subpaths_from_bez(path: &BezPath, subdivisions: u32) -> Vec<Vec<Point>> {
    let n = subdivisions.max(1);
    let mut out = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut last = Point::ZERO;
    let mut start = Point::ZERO;

    let mut finish = |current: &mut Vec<Point>| {
        if !current.is_empty() {
            out.push(std::mem::take(current));
        }
    };

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                finish(&mut current);
                current.push(p);
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                if current.is_empty() {
                    current.push(last);
                }
                current.push(p);
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                if current.is_empty() {
                    current.push(last);
                }
                let q = QuadBez::new(last, p1, p2);
                current.extend((1..=n).map(|i| q.eval(f64::from(i) / f64::from(n))));
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                if current.is_empty() {
                    current.push(last);
                }
                let c = CubicBez::new(last, p1, p2, p3);
                current.extend((1..=n).map(|i| c.eval(f64::from(i) / f64::from(n))));
                last = p3;
            }
            PathEl::ClosePath => {
                finish(&mut current);
                last = start;
            }
        }
    }
    finish(&mut current);

    out
}

#[cfg(test)]
#[path = "../../tests/unit/source/path.rs"]
mod tests;
