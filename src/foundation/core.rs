pub use kurbo::{BezPath, Point};

/// Integer point in device pixel space.
///
/// Every geometry transform produces fresh `Vector` values with coordinates truncated toward
/// zero, so two runs over the same input always land on the same pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Vector {
    /// Horizontal pixel coordinate.
    pub x: i64,
    /// Vertical pixel coordinate.
    pub y: i64,
}

impl Vector {
    /// Construct a vector from integer coordinates.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Truncate floating-point coordinates toward zero.
    pub fn truncate(x: f64, y: f64) -> Self {
        Self {
            x: crate::foundation::math::trunc_px(x),
            y: crate::foundation::math::trunc_px(y),
        }
    }

    /// `true` when either component is zero, the "unset" sentinel used by the line walker.
    pub fn is_sentinel(self) -> bool {
        self.x == 0 || self.y == 0
    }
}

impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Self::truncate(p.x, p.y)
    }
}

/// Width/height extents of a bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dim {
    /// Horizontal extent (`max.x - min.x`).
    pub w: i64,
    /// Vertical extent (`max.y - min.y`).
    pub h: i64,
}

/// Running axis-aligned bounding box over integer points.
///
/// Starts empty and grows one point at a time via [`Bounds::include`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    min: Vector,
    max: Vector,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// The sentinel state: no points seen yet.
    pub const fn empty() -> Self {
        Self {
            min: Vector::new(i64::MAX, i64::MAX),
            max: Vector::new(i64::MIN, i64::MIN),
        }
    }

    /// Bounds containing every point of `points`.
    pub fn containing(points: impl IntoIterator<Item = Vector>) -> Self {
        points.into_iter().fold(Self::empty(), |mut b, p| {
            b.include(p);
            b
        })
    }

    /// `true` when no point was ever included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Vector) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Minimum corner. Zero when empty.
    pub fn min(&self) -> Vector {
        if self.is_empty() {
            return Vector::default();
        }
        self.min
    }

    /// Maximum corner. Zero when empty.
    pub fn max(&self) -> Vector {
        if self.is_empty() {
            return Vector::default();
        }
        self.max
    }

    /// Extents of the box. Zero when empty; saturates at `i64::MAX`.
    pub fn dim(&self) -> Dim {
        if self.is_empty() {
            return Dim::default();
        }
        Dim {
            w: self.max.x.saturating_sub(self.min.x),
            h: self.max.y.saturating_sub(self.min.y),
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply straight-alpha channels.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;

        Self {
            r: mul_div255_u8(u16::from(r), u16::from(a)),
            g: mul_div255_u8(u16::from(g), u16::from(a)),
            b: mul_div255_u8(u16::from(b), u16::from(a)),
            a,
        }
    }

    /// Composite `self` over `dst` (source-over, premultiplied).
    pub fn over(self, dst: Self) -> Self {
        use crate::foundation::math::mul_div255_u8;

        let inv = 255 - u16::from(self.a);
        Self {
            r: self.r.saturating_add(mul_div255_u8(u16::from(dst.r), inv)),
            g: self.g.saturating_add(mul_div255_u8(u16::from(dst.g), inv)),
            b: self.b.saturating_add(mul_div255_u8(u16::from(dst.b), inv)),
            a: self.a.saturating_add(mul_div255_u8(u16::from(dst.a), inv)),
        }
    }

    /// Convert back to straight alpha `[r, g, b, a]`.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u32::from(self.a);
        let unpremul = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
