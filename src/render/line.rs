use crate::foundation::core::Vector;

/// Integer Bresenham walk from `(x0, y0)` to `(x1, y1)`, calling `plot` once per pixel.
///
/// Both endpoints are visited. Works in all eight octants and stops exactly when the moving
/// point reaches the target.
pub fn walk_line(x0: i64, y0: i64, x1: i64, y1: i64, mut plot: impl FnMut(i64, i64)) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        plot(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Walk the tail segment `start -> end` with the renderer's sentinel rules.
///
/// A `start` with a zero component is the "unset" sentinel and walks nothing. Missing or zero
/// components of `end` fall back to the matching component of `start`, so a segment without a
/// previous position degenerates to a single pixel.
pub fn walk_segment(start: Vector, end: Option<Vector>, plot: impl FnMut(i64, i64)) {
    if start.is_sentinel() {
        return;
    }
    let end = end.unwrap_or(start);
    let x1 = if end.x == 0 { start.x } else { end.x };
    let y1 = if end.y == 0 { start.y } else { end.y };
    walk_line(start.x, start.y, x1, y1, plot);
}

#[cfg(test)]
#[path = "../../tests/unit/render/line.rs"]
mod tests;
