use crate::foundation::core::Rgba8Premul;

/// Pixel target the engine draws on.
///
/// Coordinates passed to the pixel methods are physical (device) pixels. Writes outside the
/// backing store are ignored.
pub trait Surface {
    /// Size in logical units, before the device pixel ratio is applied.
    fn logical_size(&self) -> (f64, f64);

    /// Physical pixels per logical unit.
    fn device_pixel_ratio(&self) -> f64;

    /// Reallocate the backing store; existing contents are discarded.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Current backing store size in physical pixels.
    fn backing_size(&self) -> (u32, u32);

    /// Composite `color` over the pixel at `(x, y)`.
    fn fill_pixel(&mut self, x: i64, y: i64, color: Rgba8Premul);

    /// Reset the pixel at `(x, y)` to transparent.
    fn clear_pixel(&mut self, x: i64, y: i64);

    /// Reset a rectangle to transparent.
    fn clear_rect(&mut self, x: i64, y: i64, width: u32, height: u32) {
        for yy in y..y + i64::from(height) {
            for xx in x..x + i64::from(width) {
                self.clear_pixel(xx, yy);
            }
        }
    }
}

/// In-memory premultiplied RGBA8 surface.
#[derive(Clone, Debug)]
pub struct PixmapSurface {
    logical_width: f64,
    logical_height: f64,
    dpr: f64,
    pixels: image::RgbaImage,
}

impl PixmapSurface {
    /// Create a surface of `width x height` logical units at the given device pixel ratio.
    ///
    /// The backing store starts empty; the engine sizes it on its first resize.
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            logical_width: width.max(0.0),
            logical_height: height.max(0.0),
            dpr,
            pixels: image::RgbaImage::new(0, 0),
        }
    }

    /// Change the logical size, as a window resize would. Call the engine's `resize()` next.
    pub fn set_logical_size(&mut self, width: f64, height: f64) {
        self.logical_width = width.max(0.0);
        self.logical_height = height.max(0.0);
    }

    /// Change the device pixel ratio.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        if dpr.is_finite() && dpr > 0.0 {
            self.dpr = dpr;
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the backing store.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba8Premul> {
        let (x, y) = self.index(x, y)?;
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Rgba8Premul { r, g, b, a })
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[3] != 0).count()
    }

    /// Straight-alpha copy of the backing store, suitable for PNG export.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut out = self.pixels.clone();
        for px in out.pixels_mut() {
            let [r, g, b, a] = px.0;
            px.0 = Rgba8Premul { r, g, b, a }.to_straight_rgba();
        }
        out
    }

    fn index(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.pixels.width() && y < self.pixels.height()).then_some((x, y))
    }
}

impl Surface for PixmapSurface {
    fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.pixels = image::RgbaImage::new(width, height);
    }

    fn backing_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn fill_pixel(&mut self, x: i64, y: i64, color: Rgba8Premul) {
        let Some((x, y)) = self.index(x, y) else {
            return;
        };
        let px = self.pixels.get_pixel_mut(x, y);
        let [r, g, b, a] = px.0;
        let out = color.over(Rgba8Premul { r, g, b, a });
        px.0 = [out.r, out.g, out.b, out.a];
    }

    fn clear_pixel(&mut self, x: i64, y: i64) {
        if let Some((x, y)) = self.index(x, y) {
            self.pixels.put_pixel(x, y, image::Rgba([0, 0, 0, 0]));
        }
    }

    fn clear_rect(&mut self, x: i64, y: i64, width: u32, height: u32) {
        let (bw, bh) = self.pixels.dimensions();
        let x0 = x.clamp(0, i64::from(bw));
        let y0 = y.clamp(0, i64::from(bh));
        let x1 = (x + i64::from(width)).clamp(0, i64::from(bw));
        let y1 = (y + i64::from(height)).clamp(0, i64::from(bh));
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.pixels
                    .put_pixel(xx as u32, yy as u32, image::Rgba([0, 0, 0, 0]));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
